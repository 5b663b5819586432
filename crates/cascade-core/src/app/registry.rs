//! ModuleRegistry - レシピの各モジュールのインスタンスを保持
//!
//! # 設計
//! - 並行実行が始まる前に一度だけ構築
//! - キーはレシピで宣言された名前のみ（重複なし）
//! - 1 モジュール = 1 インスタンス。各フェーズのタスクが自分の分だけ lock する

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::Recipe;
use crate::error::CoreError;
use crate::ports::{Module, ModuleFactory};
use crate::store::PipelineState;

/// A module instance shared between the registry and its phase task.
pub type SharedModule = Arc<Mutex<Box<dyn Module>>>;

pub struct ModuleRegistry {
    modules: HashMap<String, SharedModule>,
}

impl ModuleRegistry {
    /// Instantiate every module of `recipe` through `factory`.
    ///
    /// Fails on the first name the factory does not know; nothing is recorded
    /// in the error ledger for that case.
    pub fn load(
        recipe: &Recipe,
        factory: &dyn ModuleFactory,
        state: &Arc<PipelineState>,
    ) -> Result<Self, CoreError> {
        let mut modules = HashMap::with_capacity(recipe.modules.len());
        for descriptor in &recipe.modules {
            let constructor = factory
                .constructor(&descriptor.name)
                .ok_or_else(|| CoreError::UnknownModule(descriptor.name.clone()))?;
            let module = constructor(Arc::clone(state));
            debug!(module = %descriptor.name, "module instantiated");
            modules.insert(descriptor.name.clone(), Arc::new(Mutex::new(module)));
        }
        Ok(Self { modules })
    }

    pub fn get(&self, name: &str) -> Option<SharedModule> {
        self.modules.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Config, ModuleArgs, ModuleDescriptor, ProcessError, SetupError};
    use crate::impls::{MemorySink, ModuleCatalog};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Noop;

    #[async_trait]
    impl Module for Noop {
        async fn setup(&mut self, _args: ModuleArgs) -> Result<(), SetupError> {
            Ok(())
        }

        async fn process(&mut self) -> Result<(), ProcessError> {
            Ok(())
        }
    }

    fn state() -> Arc<PipelineState> {
        Arc::new(PipelineState::new(Config::new(), Arc::new(MemorySink::new())))
    }

    #[test]
    fn one_instance_per_declared_module() {
        let built = Arc::new(AtomicUsize::new(0));
        let mut catalog = ModuleCatalog::new();
        for name in ["collector", "parser", "unused"] {
            let built = Arc::clone(&built);
            catalog
                .register_fn(name, move |_| {
                    built.fetch_add(1, Ordering::SeqCst);
                    Box::new(Noop)
                })
                .unwrap();
        }
        let recipe = Recipe::new(vec![
            ModuleDescriptor::new("collector"),
            ModuleDescriptor::new("parser").with_want("collector"),
        ]);

        let registry = ModuleRegistry::load(&recipe, &catalog, &state()).unwrap();
        assert_eq!(registry.names(), vec!["collector".to_string(), "parser".to_string()]);
        assert!(!registry.contains("unused"));
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unknown_module_fails_fast() {
        let catalog = ModuleCatalog::new();
        let recipe = Recipe::new(vec![ModuleDescriptor::new("ghost")]);
        let state = state();

        let err = ModuleRegistry::load(&recipe, &catalog, &state).err().unwrap();
        assert!(matches!(err, CoreError::UnknownModule(name) if name == "ghost"));
        assert!(state.errors(crate::store::ErrorScope::Global).is_empty());
    }
}
