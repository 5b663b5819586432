//! Ports - 抽象化レイヤー
//!
//! コアが外部の協力者に要求するインターフェースだけを定義します。
//! 実装はコアの外（CLI やテスト）か `impls` に置きます。
//!
//! - **Module**: パイプラインの処理単位（setup / process）
//! - **ModuleFactory**: モジュール名 → コンストラクタ
//! - **ArgumentResolver**: レシピ引数 + 上書き + 設定 → 最終引数
//! - **ReportSink**: コンソール向けレポート行の出力先

pub mod factory;
pub mod module;
pub mod report_sink;
pub mod resolver;

pub use self::factory::{ModuleConstructor, ModuleFactory};
pub use self::module::Module;
pub use self::report_sink::ReportSink;
pub use self::resolver::ArgumentResolver;
