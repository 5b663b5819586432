//! Domain model (recipe, containers, errors, run state, ids).

pub mod config;
pub mod container;
pub mod dependency;
pub mod errors;
pub mod ids;
pub mod recipe;
pub mod state;

pub use self::config::Config;
pub use self::container::{Container, ContainerKind};
pub use self::dependency::DependencyGraph;
pub use self::errors::{
    ErrorEntry, PipelineError, ProcessError, SetupError, UNKNOWN_ERROR_PREFIX,
    unknown_error_message,
};
pub use self::ids::RunId;
pub use self::recipe::{ModuleArgs, ModuleDescriptor, Recipe};
pub use self::state::{Phase, PipelineStatus};
