//! App - アプリケーション層
//!
//! ports と store を組み合わせて 2 フェーズ実行を実装します。
//!
//! # 主要コンポーネント
//! - **PipelineBuilder**: レシピ検証、レジストリ構築、ワイヤリング
//! - **ModuleRegistry**: モジュール名 → インスタンス
//! - **SignalRegistry**: モジュールごとの一回きりの完了通知
//! - **Orchestrator**: setup / run フェーズの spawn-all / join-all と abort 判定

pub mod builder;
pub mod orchestrator;
pub mod registry;
pub mod signal;

pub use self::builder::PipelineBuilder;
pub use self::orchestrator::{ABORT_EXIT_CODE, AbortPolicy, Orchestrator};
pub use self::registry::{ModuleRegistry, SharedModule};
pub use self::signal::{Signal, SignalRegistry};
