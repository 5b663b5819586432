//! ReportSink port - ユーザー向けレポート行の出力先
//!
//! エラーレポートと "Module X completed" 行はここを通ります。
//! 診断ログ（tracing）とは別の経路です。

pub trait ReportSink: Send + Sync {
    fn emit(&self, line: &str);
}
