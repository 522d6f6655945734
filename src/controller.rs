// Generation run state machine: status, progress and the log feed, driven by two owned timers.
// Rule: every call is valid; anything that does not apply to the current status is a no-op.
// See DESIGN.md: controller.rs

use log::{debug, trace};

use crate::catalog::LogCatalog;
use crate::timer::{TimerId, TimerQueue};
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunEvent {
    Tick,
    Complete,
}

/// Owns one widget session's generation state. Created once, reused across runs.
pub struct GenerationController {
    status: GenerationStatus,
    progress: Progress,
    logs: Vec<String>,
    catalog: LogCatalog,
    tick_period_ms: u64,
    completion_delay_ms: u64,
    restart_policy: RestartPolicy,
    timers: TimerQueue<RunEvent>,
    tick_timer: Option<TimerId>,
    completion_timer: Option<TimerId>,
    revision: u64,
    torn_down: bool,
}

impl GenerationController {
    pub fn new(config: &WidgetConfig) -> Self {
        GenerationController {
            status: GenerationStatus::Idle,
            progress: Progress::default(),
            logs: Vec::new(),
            catalog: LogCatalog::new(config.log_catalog.clone()),
            tick_period_ms: config.tick_period_ms,
            completion_delay_ms: config.completion_delay_ms,
            restart_policy: config.restart_policy,
            timers: TimerQueue::new(),
            tick_timer: None,
            completion_timer: None,
            revision: 0,
            torn_down: false,
        }
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn catalog(&self) -> &LogCatalog {
        &self.catalog
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn is_ticking(&self) -> bool {
        self.tick_timer.is_some()
    }

    pub fn is_completion_pending(&self) -> bool {
        self.completion_timer.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Live timer count, 0 or 1 outside of a bug.
    pub fn active_timers(&self) -> usize {
        self.timers.active_count()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            progress: self.progress,
            logs: self.logs.clone(),
            revision: self.revision,
            completion_pending: self.is_completion_pending(),
        }
    }

    /// Begin a run. Returns whether a run was started.
    ///
    /// Rejected silently when `has_valid_input` is false, from `Completed`, after teardown,
    /// and while a run is in progress under [`RestartPolicy::Ignore`].
    pub fn start(&mut self, has_valid_input: bool) -> bool {
        if self.torn_down || !has_valid_input {
            debug!("start rejected (valid input: {has_valid_input}, torn down: {})", self.torn_down);
            return false;
        }

        match (self.status, self.restart_policy) {
            (GenerationStatus::Idle, _) => {}
            (GenerationStatus::InProgress, RestartPolicy::Restart) => {
                debug!("restarting run at {}%", self.progress.as_u8());
            }
            (GenerationStatus::InProgress, RestartPolicy::Ignore) => {
                debug!("start ignored: run already in progress");
                return false;
            }
            (GenerationStatus::Completed, _) => {
                debug!("start ignored: reset required after completion");
                return false;
            }
        }

        // Old tick stream must be gone before the new one exists.
        self.cancel_timers();

        self.status = GenerationStatus::InProgress;
        self.progress = Progress::default();
        self.logs.clear();
        if let Some(first) = self.catalog.get(0) {
            self.logs.push(first.to_string());
        }
        self.tick_timer = Some(
            self.timers
                .schedule_repeating(self.tick_period_ms, RunEvent::Tick),
        );
        self.bump();

        debug!("run started at {}ms", self.now().as_u64());
        true
    }

    /// One progress step. Returns whether any observable state changed.
    pub fn tick(&mut self) -> bool {
        if self.torn_down || self.status != GenerationStatus::InProgress {
            return false;
        }

        if self.progress.is_complete() {
            let changed = self.finish_ticking();
            if changed {
                self.bump();
            }
            return changed;
        }

        let index = self.catalog.index_for(self.progress.as_u8());
        if let Some(message) = self.catalog.get(index) {
            if !self.logs.iter().any(|logged| logged == message) {
                trace!("log[{index}] at {}%: {message}", self.progress.as_u8());
                self.logs.push(message.to_string());
            }
        }

        self.progress = self.progress.advanced();
        if self.progress.is_complete() {
            self.finish_ticking();
        }
        self.bump();
        true
    }

    /// Back to `Idle` from `Completed`. Progress and logs are kept until the next start.
    pub fn reset(&mut self) -> bool {
        if self.torn_down || self.status != GenerationStatus::Completed {
            return false;
        }
        self.status = GenerationStatus::Idle;
        self.bump();
        debug!("reset to idle");
        true
    }

    /// Feed elapsed host time and fire every timer that fell due, in order.
    /// Returns whether any observable state changed.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        if self.torn_down {
            return false;
        }

        let before = self.revision;
        let target = self.timers.now().saturating_add(elapsed_ms);

        while let Some((id, event)) = self.timers.pop_due(target) {
            match event {
                RunEvent::Tick => {
                    self.tick();
                }
                RunEvent::Complete => self.complete(id),
            }
        }
        self.timers.settle_at(target);

        self.revision != before
    }

    /// Cancel both timers and freeze the controller. Mirrors the hosting view unmounting.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.cancel_timers();
        self.torn_down = true;
        debug!("controller torn down in {:?}", self.status);
    }

    /// Progress hit 100: the tick timer goes, the completion delay starts. Each happens once per run.
    fn finish_ticking(&mut self) -> bool {
        let mut changed = false;
        if let Some(id) = self.tick_timer.take() {
            self.timers.cancel(id);
            changed = true;
        }
        if self.completion_timer.is_none() {
            self.completion_timer = Some(
                self.timers
                    .schedule_once(self.completion_delay_ms, RunEvent::Complete),
            );
            debug!(
                "progress complete at {}ms, result in {}ms",
                self.now().as_u64(),
                self.completion_delay_ms
            );
            changed = true;
        }
        changed
    }

    fn complete(&mut self, id: TimerId) {
        if self.completion_timer != Some(id) || self.status != GenerationStatus::InProgress {
            return;
        }
        self.completion_timer = None;
        self.status = GenerationStatus::Completed;
        self.bump();
        debug!("run completed at {}ms", self.now().as_u64());
    }

    fn cancel_timers(&mut self) {
        if let Some(id) = self.tick_timer.take() {
            self.timers.cancel(id);
        }
        if let Some(id) = self.completion_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

impl Default for GenerationController {
    fn default() -> Self {
        Self::new(&WidgetConfig::default())
    }
}
