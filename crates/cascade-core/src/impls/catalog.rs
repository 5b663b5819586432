//! ModuleCatalog - モジュール名とコンストラクタの対応表
//!
//! # 設計
//! - 起動時に登録（mutable）
//! - 実行時は参照のみ（immutable、`Arc` で共有）

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CatalogError;
use crate::ports::{Module, ModuleConstructor, ModuleFactory};
use crate::store::PipelineState;

/// ModuleCatalog はデフォルトの ModuleFactory 実装
///
/// # 使用例
/// ```ignore
/// let mut catalog = ModuleCatalog::new();
/// catalog.register_fn("collector", |state| Box::new(Collector::new(state)))?;
/// let factory: Arc<dyn ModuleFactory> = Arc::new(catalog);
/// ```
#[derive(Default)]
pub struct ModuleCatalog {
    constructors: HashMap<String, ModuleConstructor>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: ModuleConstructor,
    ) -> Result<(), CatalogError> {
        let name = name.into();
        if self.constructors.contains_key(&name) {
            return Err(CatalogError::AlreadyRegistered(name));
        }
        self.constructors.insert(name, constructor);
        Ok(())
    }

    pub fn register_fn<F>(
        &mut self,
        name: impl Into<String>,
        constructor: F,
    ) -> Result<(), CatalogError>
    where
        F: Fn(Arc<PipelineState>) -> Box<dyn Module> + Send + Sync + 'static,
    {
        self.register(name, Arc::new(constructor))
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl ModuleFactory for ModuleCatalog {
    fn constructor(&self, name: &str) -> Option<ModuleConstructor> {
        self.constructors.get(name).cloned()
    }

    fn known_modules(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModuleArgs, ProcessError, SetupError};
    use async_trait::async_trait;

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

    #[test]
    fn register_and_resolve() {
        let mut catalog = ModuleCatalog::new();
        catalog.register_fn("noop", |_| Box::new(Noop)).unwrap();

        assert!(catalog.constructor("noop").is_some());
        assert!(catalog.constructor("other").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn double_registration_is_rejected() {
        let mut catalog = ModuleCatalog::new();
        catalog.register_fn("noop", |_| Box::new(Noop)).unwrap();
        let result = catalog.register_fn("noop", |_| Box::new(Noop));
        assert!(matches!(result, Err(CatalogError::AlreadyRegistered(name)) if name == "noop"));
    }

    #[test]
    fn known_modules_are_sorted() {
        let mut catalog = ModuleCatalog::new();
        catalog.register_fn("zeta", |_| Box::new(Noop)).unwrap();
        catalog.register_fn("alpha", |_| Box::new(Noop)).unwrap();
        assert_eq!(catalog.known_modules(), vec!["alpha".to_string(), "zeta".to_string()]);
    }
}
