//! PipelineBuilder - パイプラインの構築とワイヤリング
//!
//! # Fail-fast 設計
//! - build() 時にレシピを検証（重複名・未宣言の wants・循環）
//! - factory が知らないモジュール名があればその場で失敗
//! - どちらも ledger には記録しない（レシピの誤りであって実行時の失敗ではない）

use std::sync::Arc;

use serde_json::Value;

use super::orchestrator::{AbortPolicy, Orchestrator};
use super::registry::ModuleRegistry;
use crate::domain::{Config, ModuleArgs, Recipe};
use crate::error::CoreError;
use crate::impls::{PlaceholderResolver, StdoutSink};
use crate::ports::{ArgumentResolver, ModuleFactory, ReportSink};
use crate::store::PipelineState;

/// PipelineBuilder は Orchestrator を構築
///
/// # 使用例
/// ```ignore
/// let mut orchestrator = PipelineBuilder::new(Arc::new(catalog))
///     .config(config)
///     .override_arg("paths", json!(["/var/log/syslog"]))
///     .build(recipe)?;
/// orchestrator.run().await?;
/// ```
pub struct PipelineBuilder {
    factory: Arc<dyn ModuleFactory>,
    resolver: Arc<dyn ArgumentResolver>,
    sink: Arc<dyn ReportSink>,
    config: Config,
    overrides: ModuleArgs,
    abort_policy: AbortPolicy,
}

impl PipelineBuilder {
    /// Defaults: `PlaceholderResolver`, `StdoutSink`, empty config,
    /// `AbortPolicy::ExitProcess`.
    pub fn new(factory: Arc<dyn ModuleFactory>) -> Self {
        Self {
            factory,
            resolver: Arc::new(PlaceholderResolver::new()),
            sink: Arc::new(StdoutSink),
            config: Config::new(),
            overrides: ModuleArgs::new(),
            abort_policy: AbortPolicy::default(),
        }
    }

    pub fn resolver(mut self, resolver: Arc<dyn ArgumentResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn overrides(mut self, overrides: ModuleArgs) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn override_arg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.overrides.insert(key.into(), value);
        self
    }

    pub fn abort_policy(mut self, policy: AbortPolicy) -> Self {
        self.abort_policy = policy;
        self
    }

    /// Validate `recipe`, instantiate its modules and return a ready orchestrator.
    pub fn build(self, recipe: Recipe) -> Result<Orchestrator, CoreError> {
        recipe.validate()?;
        let state = Arc::new(PipelineState::new(self.config, self.sink));
        let registry = ModuleRegistry::load(&recipe, self.factory.as_ref(), &state)?;
        Ok(Orchestrator::new(
            recipe,
            registry,
            state,
            self.resolver,
            self.overrides,
            self.abort_policy,
        ))
    }
}
