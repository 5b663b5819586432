//! Orchestrator - setup / run の 2 フェーズ実行
//!
//! # フロー（各フェーズ共通）
//! 1. 全モジュール分の Signal を先に作る
//! 2. モジュールごとに 1 タスクを spawn（上限なし）
//! 3. 全タスクを join
//! 4. global ledger を check_errors → critical があればここで abort
//!
//! # 失敗の扱い
//! - モジュールの失敗（Err / panic）はタスク境界で ledger に変換され、外へは伝播しない
//! - 失敗しても Signal は必ず set されるので、依存側はブロックされない
//! - abort はフェーズ境界でだけ起きる。同じフェーズの兄弟タスクは最後まで走る

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::registry::{ModuleRegistry, SharedModule};
use super::signal::SignalRegistry;
use crate::domain::{
    ModuleArgs, ModuleDescriptor, Phase, PipelineStatus, Recipe, unknown_error_message,
};
use crate::error::CoreError;
use crate::observability::RunReport;
use crate::ports::ArgumentResolver;
use crate::store::{ErrorScope, PipelineState};

/// Exit status used when a critical error aborts the process.
pub const ABORT_EXIT_CODE: i32 = -1;

/// What happens when a phase boundary finds a critical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbortPolicy {
    /// Terminate the process right after the abort notice.
    #[default]
    ExitProcess,
    /// Return `CoreError::Aborted` from the phase instead.
    ReturnError,
}

/// What every task of one phase shares.
#[derive(Clone)]
struct PhaseContext {
    state: Arc<PipelineState>,
    resolver: Arc<dyn ArgumentResolver>,
    overrides: Arc<ModuleArgs>,
    signals: Arc<SignalRegistry>,
}

pub struct Orchestrator {
    recipe: Recipe,
    registry: ModuleRegistry,
    state: Arc<PipelineState>,
    resolver: Arc<dyn ArgumentResolver>,
    overrides: Arc<ModuleArgs>,
    abort_policy: AbortPolicy,
    status: PipelineStatus,
    started_at: Option<DateTime<Utc>>,
}

impl Orchestrator {
    pub(crate) fn new(
        recipe: Recipe,
        registry: ModuleRegistry,
        state: Arc<PipelineState>,
        resolver: Arc<dyn ArgumentResolver>,
        overrides: ModuleArgs,
        abort_policy: AbortPolicy,
    ) -> Self {
        Self {
            recipe,
            registry,
            state,
            resolver,
            overrides: Arc::new(overrides),
            abort_policy,
            status: PipelineStatus::NotStarted,
            started_at: None,
        }
    }

    pub fn status(&self) -> PipelineStatus {
        self.status
    }

    pub fn state(&self) -> &Arc<PipelineState> {
        &self.state
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Run both phases and summarize the run.
    pub async fn run(&mut self) -> Result<RunReport, CoreError> {
        self.setup_modules().await?;
        self.run_modules().await?;
        Ok(self.report())
    }

    /// Setup phase: resolve args and call `setup()` on every module concurrently.
    pub async fn setup_modules(&mut self) -> Result<(), CoreError> {
        self.transition(PipelineStatus::SetupRunning)?;
        self.started_at = Some(Utc::now());
        let ctx = self.phase_context(Phase::Setup);

        let mut joins = Vec::with_capacity(self.recipe.modules.len());
        for descriptor in &self.recipe.modules {
            let module = self.module(&descriptor.name)?;
            let task = setup_task(descriptor.clone(), module, ctx.clone());
            joins.push((descriptor.name.clone(), tokio::spawn(task)));
        }
        self.join_phase(joins).await;
        self.finish_phase(Phase::Setup, PipelineStatus::SetupDone)
    }

    /// Run phase: every module waits for its `wants`, then `process()` runs.
    pub async fn run_modules(&mut self) -> Result<(), CoreError> {
        self.transition(PipelineStatus::RunRunning)?;
        let ctx = self.phase_context(Phase::Run);

        let mut joins = Vec::with_capacity(self.recipe.modules.len());
        for descriptor in &self.recipe.modules {
            let module = self.module(&descriptor.name)?;
            let task = run_task(descriptor.clone(), module, ctx.clone());
            joins.push((descriptor.name.clone(), tokio::spawn(task)));
        }
        self.join_phase(joins).await;
        self.finish_phase(Phase::Run, PipelineStatus::RunDone)
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            run_id: self.state.run_id(),
            status: self.status,
            modules: self.registry.len(),
            errors: self.state.errors(ErrorScope::Global),
            containers: self.state.container_counts(),
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }

    fn phase_context(&self, phase: Phase) -> PhaseContext {
        info!(
            run_id = %self.state.run_id(),
            %phase,
            modules = self.recipe.modules.len(),
            "phase started"
        );
        PhaseContext {
            state: Arc::clone(&self.state),
            resolver: Arc::clone(&self.resolver),
            overrides: Arc::clone(&self.overrides),
            signals: Arc::new(SignalRegistry::for_modules(self.recipe.module_names())),
        }
    }

    fn module(&self, name: &str) -> Result<SharedModule, CoreError> {
        self.registry
            .get(name)
            .ok_or_else(|| CoreError::UnknownModule(name.to_string()))
    }

    fn transition(&mut self, next: PipelineStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    async fn join_phase(&self, joins: Vec<(String, JoinHandle<()>)>) {
        for (name, join) in joins {
            // tasks contain module panics themselves; this only fires if the
            // bookkeeping around the module call failed
            if let Err(e) = join.await {
                error!(module = %name, error = %e, "module task failed");
                self.state.add_error(unknown_error_message(e), true);
                self.state.cleanup();
            }
        }
    }

    fn finish_phase(&mut self, phase: Phase, next: PipelineStatus) -> Result<(), CoreError> {
        let scan = self.state.check_errors(ErrorScope::Global);
        if let Some(cause) = scan.abort_cause() {
            let message = cause.message().to_string();
            self.transition(PipelineStatus::Aborted)?;
            error!(run_id = %self.state.run_id(), %phase, %message, "critical error, aborting");
            return match self.abort_policy {
                AbortPolicy::ExitProcess => std::process::exit(ABORT_EXIT_CODE),
                AbortPolicy::ReturnError => Err(CoreError::Aborted(message)),
            };
        }
        self.transition(next)?;
        info!(
            run_id = %self.state.run_id(),
            %phase,
            errors = scan.emitted().len(),
            "phase finished"
        );
        Ok(())
    }
}

async fn setup_task(descriptor: ModuleDescriptor, module: SharedModule, ctx: PhaseContext) {
    let name = descriptor.name;
    let outcome = match ctx
        .resolver
        .resolve(&descriptor.args, &ctx.overrides, ctx.state.config())
    {
        Ok(args) => {
            debug!(module = %name, "setup started");
            contain(async move {
                let mut module = module.lock().await;
                module.setup(args).await
            })
            .await
            .and_then(|result| result.map_err(|e| e.to_string()))
        }
        Err(e) => Err(e.to_string()),
    };

    if let Err(reason) = outcome {
        ctx.state.add_error(unknown_error_message(reason), true);
    }
    ctx.signals.set(&name);
    ctx.state.cleanup();
}

async fn run_task(descriptor: ModuleDescriptor, module: SharedModule, ctx: PhaseContext) {
    let name = descriptor.name;
    if !descriptor.wants.is_empty() {
        debug!(module = %name, wants = ?descriptor.wants, "waiting for dependencies");
        ctx.signals.wait_all(&descriptor.wants).await;
    }

    debug!(module = %name, "process started");
    let outcome = contain(async move {
        let mut module = module.lock().await;
        module.process().await
    })
    .await;
    match outcome {
        Ok(Ok(())) => debug!(module = %name, "process finished"),
        Ok(Err(e)) => ctx.state.add_error(e.ledger_message(), true),
        Err(reason) => ctx.state.add_error(unknown_error_message(reason), true),
    }

    ctx.state.report(&format!("Module {name} completed"));
    ctx.signals.set(&name);
    ctx.state.cleanup();
}

/// Run a module call on its own task so that a panic becomes an `Err`.
async fn contain<E>(
    call: impl Future<Output = Result<(), E>> + Send + 'static,
) -> Result<Result<(), E>, String>
where
    E: Send + 'static,
{
    tokio::spawn(call).await.map_err(|e| {
        if e.is_panic() {
            panic_reason(e.into_panic())
        } else {
            e.to_string()
        }
    })
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("module panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("module panicked: {s}")
    } else {
        "module panicked".to_string()
    }
}
