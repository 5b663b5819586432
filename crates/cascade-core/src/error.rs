use thiserror::Error;

use crate::domain::PipelineStatus;

/// Crate-level error for building and driving a pipeline.
///
/// Module failures never show up here; they go to the error ledger.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("module '{0}' is not known to the module factory")]
    UnknownModule(String),

    #[error(transparent)]
    Recipe(#[from] RecipeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot move pipeline from {from} to {to}")]
    InvalidTransition {
        from: PipelineStatus,
        to: PipelineStatus,
    },

    #[error("pipeline aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    #[error("invalid recipe: {0}")]
    Parse(String),

    #[error("module '{0}' is declared more than once")]
    DuplicateModule(String),

    #[error("module '{module}' wants undeclared module '{wants}'")]
    UnknownDependency { module: String, wants: String },

    #[error("dependency cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("module '{0}' is already registered")]
    AlreadyRegistered(String),
}
