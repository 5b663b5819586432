//! Two-tier error ledger.
//!
//! - local: entries recorded by module tasks since the last `promote_local`
//! - global: every entry of the run, in promotion order
//!
//! Both lists sit behind one mutex so a promotion is atomic with respect to
//! concurrent `add_error` calls from sibling tasks.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::lock;
use crate::domain::ErrorEntry;

/// First line of an error report.
pub const ERROR_HEADER: &str = "cascade encountered one or more errors:";

/// Marker printed in front of critical entries.
pub const CRITICAL_PREFIX: &str = "CRITICAL: ";

/// Printed right after the entry that triggers the abort.
pub const ABORT_NOTICE: &str = "Critical error found. Aborting.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorScope {
    Local,
    Global,
}

#[derive(Debug, Default)]
struct LedgerLists {
    local: Vec<ErrorEntry>,
    global: Vec<ErrorEntry>,
}

#[derive(Debug, Default)]
pub struct ErrorLedger {
    inner: Mutex<LedgerLists>,
}

impl ErrorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the local list.
    pub fn add_error(&self, message: impl Into<String>, critical: bool) {
        lock(&self.inner)
            .local
            .push(ErrorEntry::new(message, critical));
    }

    /// Move every local entry, in order, to the end of the global list.
    ///
    /// Returns how many entries were moved.
    pub fn promote_local(&self) -> usize {
        let mut guard = lock(&self.inner);
        let LedgerLists { local, global } = &mut *guard;
        let moved = local.len();
        global.append(local);
        moved
    }

    pub fn entries(&self, scope: ErrorScope) -> Vec<ErrorEntry> {
        let guard = lock(&self.inner);
        match scope {
            ErrorScope::Local => guard.local.clone(),
            ErrorScope::Global => guard.global.clone(),
        }
    }

    /// Scan `scope` in insertion order, stopping at the first critical entry.
    pub fn scan(&self, scope: ErrorScope) -> ErrorScan {
        ErrorScan::of(&self.entries(scope))
    }
}

/// Result of scanning one ledger list.
///
/// `emitted` holds the entries a user gets to see: everything up to and
/// including the first critical entry. Later entries are not part of the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorScan {
    emitted: Vec<ErrorEntry>,
    aborted: bool,
}

impl ErrorScan {
    pub fn of(entries: &[ErrorEntry]) -> Self {
        let mut emitted = Vec::new();
        for entry in entries {
            emitted.push(entry.clone());
            if entry.is_critical() {
                return Self {
                    emitted,
                    aborted: true,
                };
            }
        }
        Self {
            emitted,
            aborted: false,
        }
    }

    pub fn emitted(&self) -> &[ErrorEntry] {
        &self.emitted
    }

    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// The entry that triggered the abort, if any.
    pub fn abort_cause(&self) -> Option<&ErrorEntry> {
        if self.aborted {
            self.emitted.last()
        } else {
            None
        }
    }

    /// Console lines for this scan (empty when the list was empty).
    pub fn lines(&self) -> Vec<String> {
        if self.emitted.is_empty() {
            return Vec::new();
        }
        let mut lines = Vec::with_capacity(self.emitted.len() + 2);
        lines.push(ERROR_HEADER.to_string());
        for entry in &self.emitted {
            let prefix = if entry.is_critical() { CRITICAL_PREFIX } else { "" };
            lines.push(format!("{prefix}  {}", entry.message()));
        }
        if self.aborted {
            lines.push(ABORT_NOTICE.to_string());
        }
        lines
    }
}
