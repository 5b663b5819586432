//! ReportSink 実装
//!
//! - `StdoutSink`: 本番用。1 行ずつ標準出力へ
//! - `MemorySink`: テスト用。行をメモリに溜める

use std::io::Write;
use std::sync::Mutex;

use crate::ports::ReportSink;
use crate::store::lock;

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        // ignore write errors: a closed stdout must not take a module task down
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }
}

impl ReportSink for MemorySink {
    fn emit(&self, line: &str) {
        lock(&self.lines).push(line.to_string());
    }
}
