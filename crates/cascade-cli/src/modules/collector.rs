use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use cascade_core::PipelineState;
use cascade_core::domain::{Container, ModuleArgs, PipelineError, ProcessError, SetupError};
use cascade_core::ports::Module;
use serde_json::Value;
use tracing::debug;

use super::containers::FilePath;

/// Checks the `paths` argument and publishes every existing file.
///
/// Missing files are reported as non-critical; having none at all is a
/// pipeline error.
pub struct FileCollector {
    state: Arc<PipelineState>,
    paths: Vec<PathBuf>,
}

impl FileCollector {
    pub const NAME: &'static str = "file_collector";

    pub fn new(state: Arc<PipelineState>) -> Self {
        Self {
            state,
            paths: Vec::new(),
        }
    }
}

/// Accepts a JSON list of strings or one comma-separated string.
fn parse_paths(value: &Value) -> Result<Vec<PathBuf>, SetupError> {
    let invalid = |reason: &str| SetupError::InvalidArgument {
        name: "paths".into(),
        reason: reason.into(),
    };
    match value {
        Value::String(s) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(PathBuf::from)
                    .ok_or_else(|| invalid("every entry must be a string"))
            })
            .collect(),
        _ => Err(invalid("expected a list of paths or a comma-separated string")),
    }
}

#[async_trait]
impl Module for FileCollector {
    async fn setup(&mut self, args: ModuleArgs) -> Result<(), SetupError> {
        let value = args
            .get("paths")
            .ok_or_else(|| SetupError::MissingArgument("paths".into()))?;
        self.paths = parse_paths(value)?;
        Ok(())
    }

    async fn process(&mut self) -> Result<(), ProcessError> {
        let mut found = 0;
        for path in &self.paths {
            match tokio::fs::metadata(path).await {
                Ok(meta) if meta.is_file() => {
                    debug!(path = %path.display(), "collected");
                    let file = FilePath { path: path.clone() };
                    self.state.push_output(Container::new(file.clone()));
                    self.state.store_typed(file);
                    found += 1;
                }
                Ok(_) => self
                    .state
                    .add_error(format!("{} is not a regular file", path.display()), false),
                Err(e) => self
                    .state
                    .add_error(format!("cannot read {}: {e}", path.display()), false),
            }
        }
        if found == 0 {
            return Err(PipelineError::new("no input files found").into());
        }
        Ok(())
    }
}
