//! Signal - モジュール完了の一回きりの通知
//!
//! # 設計
//! - `watch::Sender<bool>` を共有し、`false → true` を一度だけ行う
//! - 待機側は `subscribe()` して `wait_for` で true を待つ（何人でも待てる）
//! - フェーズ開始前に全モジュール分を作っておくので、待機と生成が競合しない

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

/// Write-once, multi-waiter completion token.
#[derive(Debug, Clone)]
pub struct Signal {
    tx: Arc<watch::Sender<bool>>,
}

impl Signal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Mark the signal as set. Returns `false` if it was already set.
    pub fn set(&self) -> bool {
        self.tx.send_if_modified(|done| {
            if *done {
                false
            } else {
                *done = true;
                true
            }
        })
    }

    pub fn is_set(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the signal is set. Returns immediately if it already is.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // the sender lives in `self`, so wait_for cannot observe a closed channel
        let _ = rx.wait_for(|done| *done).await;
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::new()
    }
}

/// One signal per module name, created up front for a phase.
#[derive(Debug, Default)]
pub struct SignalRegistry {
    signals: HashMap<String, Signal>,
}

impl SignalRegistry {
    pub fn for_modules<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            signals: names
                .into_iter()
                .map(|name| (name.to_string(), Signal::new()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Signal> {
        self.signals.get(name)
    }

    /// Set `name`'s signal. Unknown names are ignored.
    pub fn set(&self, name: &str) {
        if let Some(signal) = self.signals.get(name) {
            let first = signal.set();
            trace!(module = name, first, "signal set");
        }
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.signals.get(name).is_some_and(Signal::is_set)
    }

    /// Wait for every named signal. Names without a signal are skipped;
    /// recipe validation guarantees there are none.
    pub async fn wait_all<'a>(&self, names: impl IntoIterator<Item = &'a String>) {
        for name in names {
            if let Some(signal) = self.signals.get(name.as_str()) {
                signal.wait().await;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn set_is_one_shot() {
        let signal = Signal::new();
        assert!(!signal.is_set());
        assert!(signal.set());
        assert!(!signal.set());
        assert!(signal.is_set());
    }

    #[tokio::test]
    async fn wait_after_set_returns_immediately() {
        let signal = Signal::new();
        signal.set();
        timeout(Duration::from_millis(100), signal.wait())
            .await
            .expect("already set");
    }

    #[tokio::test]
    async fn wait_blocks_until_set() {
        let signal = Signal::new();
        assert!(
            timeout(Duration::from_millis(50), signal.wait())
                .await
                .is_err()
        );

        let waiter = tokio::spawn({
            let signal = signal.clone();
            async move { signal.wait().await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        signal.set();
        timeout(Duration::from_secs(1), waiter)
            .await
            .expect("woken")
            .unwrap();
    }

    #[tokio::test]
    async fn many_waiters_are_released_together() {
        let signal = Signal::new();
        let waiters: Vec<_> = (0..5)
            .map(|_| {
                let signal = signal.clone();
                tokio::spawn(async move { signal.wait().await })
            })
            .collect();
        signal.set();
        for w in waiters {
            timeout(Duration::from_secs(1), w).await.unwrap().unwrap();
        }
    }

    #[tokio::test]
    async fn registry_waits_for_all_names() {
        let registry = Arc::new(SignalRegistry::for_modules(["a", "b", "c"]));
        assert_eq!(registry.len(), 3);
        let wants = vec!["a".to_string(), "b".to_string()];

        registry.set("a");
        assert!(
            timeout(Duration::from_millis(50), registry.wait_all(&wants))
                .await
                .is_err()
        );

        registry.set("b");
        timeout(Duration::from_millis(100), registry.wait_all(&wants))
            .await
            .expect("both set");
        assert!(!registry.is_set("c"));
        registry.set("unknown");
    }
}
