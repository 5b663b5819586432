use std::sync::Arc;

use async_trait::async_trait;
use cascade_core::PipelineState;
use cascade_core::domain::{ModuleArgs, PipelineError, ProcessError, SetupError};
use cascade_core::ports::Module;

use super::containers::LineCount;

/// Prints per-file line counts; fails if the total is below `min_lines`.
pub struct Summary {
    state: Arc<PipelineState>,
    min_lines: usize,
}

impl Summary {
    pub const NAME: &'static str = "summary";

    pub fn new(state: Arc<PipelineState>) -> Self {
        Self {
            state,
            min_lines: 0,
        }
    }
}

#[async_trait]
impl Module for Summary {
    async fn setup(&mut self, args: ModuleArgs) -> Result<(), SetupError> {
        if let Some(value) = args.get("min_lines") {
            let min = value.as_u64().ok_or_else(|| SetupError::InvalidArgument {
                name: "min_lines".into(),
                reason: format!("expected a non-negative integer, got {value}"),
            })?;
            self.min_lines = usize::try_from(min).unwrap_or(usize::MAX);
        }
        Ok(())
    }

    async fn process(&mut self) -> Result<(), ProcessError> {
        let counts = self.state.get_typed::<LineCount>();
        let total: usize = counts.iter().map(|c| c.lines).sum();
        for count in &counts {
            println!("{:>8}  {}", count.lines, count.path.display());
        }
        println!("{total:>8}  total");

        if total < self.min_lines {
            return Err(PipelineError::new(format!(
                "only {total} lines collected, expected at least {}",
                self.min_lines
            ))
            .into());
        }
        Ok(())
    }
}
