//! Errors - モジュールが返すエラーと ledger に記録されるエントリ
//!
//! # 分類
//! - `SetupError`: setup() の失敗。常に critical、汎用メッセージで包む
//! - `PipelineError`: process() のドメイン失敗。critical、メッセージはそのまま
//! - `ProcessError::{Io, Other}`: それ以外の process() 失敗。critical、汎用メッセージで包む

use serde::{Deserialize, Serialize};

/// Prefix used when a failure is recorded without its own domain message.
pub const UNKNOWN_ERROR_PREFIX: &str = "An unknown error occurred: ";

/// Wraps a failure reason in the generic ledger message.
pub fn unknown_error_message(reason: impl std::fmt::Display) -> String {
    format!("{UNKNOWN_ERROR_PREFIX}{reason}")
}

/// One ledger entry. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    message: String,
    critical: bool,
}

impl ErrorEntry {
    pub fn new(message: impl Into<String>, critical: bool) -> Self {
        Self {
            message: message.into(),
            critical,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }
}

/// Failure raised by `Module::setup`.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("missing argument '{0}'")]
    MissingArgument(String),

    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("{0}")]
    Other(String),
}

/// The distinguished pipeline failure a module raises on purpose.
///
/// Its message is what the user sees in the error report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct PipelineError {
    message: String,
}

impl PipelineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure raised by `Module::process`.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl ProcessError {
    /// The message written to the ledger for this failure.
    pub fn ledger_message(&self) -> String {
        match self {
            ProcessError::Pipeline(e) => e.message().to_string(),
            other => unknown_error_message(other),
        }
    }
}
