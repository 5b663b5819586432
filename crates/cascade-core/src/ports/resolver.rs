//! ArgumentResolver port - setup() に渡す最終引数の決定

use crate::domain::{Config, ModuleArgs, SetupError};

pub trait ArgumentResolver: Send + Sync {
    /// Merge a descriptor's declared `args` with externally supplied
    /// `overrides` and the process-wide `config`.
    ///
    /// An error here is recorded like a failed `setup()`.
    fn resolve(
        &self,
        declared: &ModuleArgs,
        overrides: &ModuleArgs,
        config: &Config,
    ) -> Result<ModuleArgs, SetupError>;
}
