//! The state shared by every module task of one run.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use super::{ContainerStore, ErrorLedger, ErrorScan, ErrorScope, StagingBuffers, lock};
use crate::domain::{Config, Container, ContainerKind, ErrorEntry, RunId};
use crate::ports::ReportSink;

/// Handed to every module constructor; lives for the whole run.
pub struct PipelineState {
    run_id: RunId,
    config: Config,
    containers: ContainerStore,
    ledger: ErrorLedger,
    staging: Mutex<StagingBuffers>,
    sink: Arc<dyn ReportSink>,
}

impl PipelineState {
    pub fn new(config: Config, sink: Arc<dyn ReportSink>) -> Self {
        Self {
            run_id: RunId::generate(),
            config,
            containers: ContainerStore::new(),
            ledger: ErrorLedger::new(),
            staging: Mutex::new(StagingBuffers::new()),
            sink,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ---- container store ----

    pub fn store_container(&self, container: Container) {
        self.containers.store(container);
    }

    pub fn get_containers(&self, type_tag: &str) -> Vec<Container> {
        self.containers.get(type_tag)
    }

    pub fn store_typed<T: ContainerKind>(&self, value: T) {
        self.containers.store_typed(value);
    }

    pub fn get_typed<T: ContainerKind>(&self) -> Vec<Arc<T>> {
        self.containers.get_typed::<T>()
    }

    pub fn container_counts(&self) -> BTreeMap<String, usize> {
        self.containers.counts()
    }

    // ---- staging ----

    pub fn push_output(&self, container: Container) {
        lock(&self.staging).push_output(container);
    }

    pub fn input(&self) -> Vec<Container> {
        lock(&self.staging).input().to_vec()
    }

    pub fn output(&self) -> Vec<Container> {
        lock(&self.staging).output().to_vec()
    }

    // ---- error ledger ----

    pub fn add_error(&self, message: impl Into<String>, critical: bool) {
        let message = message.into();
        if critical {
            warn!(run_id = %self.run_id, %message, "critical error recorded");
        } else {
            debug!(run_id = %self.run_id, %message, "error recorded");
        }
        self.ledger.add_error(message, critical);
    }

    pub fn errors(&self, scope: ErrorScope) -> Vec<ErrorEntry> {
        self.ledger.entries(scope)
    }

    /// End-of-task bookkeeping: local errors move to the global list, then the
    /// output buffer becomes the input buffer.
    pub fn cleanup(&self) {
        let moved = self.ledger.promote_local();
        lock(&self.staging).rotate();
        debug!(run_id = %self.run_id, promoted = moved, "cleanup");
    }

    /// Scan `scope`, write the report lines to the sink and return the scan.
    ///
    /// This never stops the run. On a critical entry the abort notice is
    /// printed and `ErrorScan::aborted` is set; acting on it is up to the
    /// caller (`Orchestrator` does so at each phase boundary).
    pub fn check_errors(&self, scope: ErrorScope) -> ErrorScan {
        let scan = self.ledger.scan(scope);
        for line in scan.lines() {
            self.sink.emit(&line);
        }
        scan
    }

    /// Write one line to the report sink.
    pub fn report(&self, line: &str) {
        self.sink.emit(line);
    }
}
