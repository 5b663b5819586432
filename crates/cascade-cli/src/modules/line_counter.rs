use std::sync::Arc;

use async_trait::async_trait;
use cascade_core::PipelineState;
use cascade_core::domain::{ModuleArgs, ProcessError, SetupError};
use cascade_core::ports::Module;

use super::containers::{FilePath, LineCount};

/// Counts the lines of every collected file.
pub struct LineCounter {
    state: Arc<PipelineState>,
}

impl LineCounter {
    pub const NAME: &'static str = "line_counter";

    pub fn new(state: Arc<PipelineState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for LineCounter {
    async fn setup(&mut self, _args: ModuleArgs) -> Result<(), SetupError> {
        Ok(())
    }

    async fn process(&mut self) -> Result<(), ProcessError> {
        for file in self.state.get_typed::<FilePath>() {
            let contents = tokio::fs::read_to_string(&file.path).await?;
            self.state.store_typed(LineCount {
                path: file.path.clone(),
                lines: contents.lines().count(),
            });
        }
        Ok(())
    }
}
