//! Module port - パイプラインの処理単位

use async_trait::async_trait;

use crate::domain::{ModuleArgs, ProcessError, SetupError};

/// Module は setup → process の 2 段階で実行される
///
/// # 使用例
/// ```ignore
/// struct Greeter {
///     state: Arc<PipelineState>,
///     name: String,
/// }
///
/// #[async_trait]
/// impl Module for Greeter {
///     async fn setup(&mut self, args: ModuleArgs) -> Result<(), SetupError> {
///         self.name = args.get("name").and_then(|v| v.as_str()).unwrap_or("world").into();
///         Ok(())
///     }
///
///     async fn process(&mut self) -> Result<(), ProcessError> {
///         self.state.store_typed(Greeting(format!("hello, {}", self.name)));
///         Ok(())
///     }
/// }
/// ```
///
/// # 契約
/// - 1 つの descriptor につき 1 インスタンス。各フェーズで自分のタスクからだけ呼ばれる
/// - 失敗はタスク境界で ledger のエントリに変換される（panic も含む）
/// - 共有状態（container store, ledger）はコンストラクタで受け取った `PipelineState` 経由で触る
#[async_trait]
pub trait Module: Send {
    async fn setup(&mut self, args: ModuleArgs) -> Result<(), SetupError>;

    async fn process(&mut self) -> Result<(), ProcessError>;
}
