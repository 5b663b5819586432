//! cascade-core
//!
//! Core building blocks for the cascade pipeline runner.
//!
//! # モジュール構成
//! - **domain**: レシピ、コンテナ、エラー、状態、ID
//! - **ports**: Module / ModuleFactory / ArgumentResolver / ReportSink
//! - **store**: container store、staging buffer、error ledger（共有状態）
//! - **app**: PipelineBuilder、ModuleRegistry、Signal、Orchestrator
//! - **impls**: ModuleCatalog、PlaceholderResolver、StdoutSink / MemorySink

pub mod app;
pub mod domain;
pub mod error;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod store;

pub use app::{AbortPolicy, Orchestrator, PipelineBuilder};
pub use error::CoreError;
pub use observability::RunReport;
pub use store::PipelineState;
