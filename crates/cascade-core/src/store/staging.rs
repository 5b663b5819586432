//! Phase staging buffers (`input` / `output`).

use crate::domain::Container;

/// What the previous stage produced (`input`) and what the current stage is
/// producing (`output`).
#[derive(Debug, Default)]
pub struct StagingBuffers {
    input: Vec<Container>,
    output: Vec<Container>,
}

impl StagingBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_output(&mut self, container: Container) {
        self.output.push(container);
    }

    pub fn input(&self) -> &[Container] {
        &self.input
    }

    pub fn output(&self) -> &[Container] {
        &self.output
    }

    /// `input <- output`, `output <- empty`. The old input is dropped.
    pub fn rotate(&mut self) {
        self.input = std::mem::take(&mut self.output);
    }
}
