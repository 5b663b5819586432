//! ModuleFactory port - モジュール名からコンストラクタを引く

use std::sync::Arc;

use super::Module;
use crate::store::PipelineState;

/// Builds one module instance bound to the run's shared state.
pub type ModuleConstructor = Arc<dyn Fn(Arc<PipelineState>) -> Box<dyn Module> + Send + Sync>;

/// ModuleFactory はレシピのモジュール名を解決する
///
/// 解決できない名前はレシピの誤りとして扱い、レジストリ構築時に即座に失敗します。
pub trait ModuleFactory: Send + Sync {
    fn constructor(&self, name: &str) -> Option<ModuleConstructor>;

    /// Names this factory can build, sorted.
    fn known_modules(&self) -> Vec<String>;
}
