//! Container types exchanged by the bundled modules.

use std::path::PathBuf;

use cascade_core::domain::ContainerKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePath {
    pub path: PathBuf,
}

impl ContainerKind for FilePath {
    const CONTAINER_TYPE: &'static str = "file_path";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCount {
    pub path: PathBuf,
    pub lines: usize,
}

impl ContainerKind for LineCount {
    const CONTAINER_TYPE: &'static str = "line_count";
}
