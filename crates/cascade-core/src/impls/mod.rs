//! Impls - ports のデフォルト実装
//!
//! - **ModuleCatalog**: 名前 → コンストラクタの HashMap
//! - **PlaceholderResolver**: `@key` 置換による引数解決
//! - **StdoutSink / MemorySink**: レポート行の出力先

pub mod catalog;
pub mod console;
pub mod placeholder;

pub use self::catalog::ModuleCatalog;
pub use self::console::{MemorySink, StdoutSink};
pub use self::placeholder::PlaceholderResolver;
