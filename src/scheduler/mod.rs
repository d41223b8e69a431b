//! Refresh scheduler
//!
//! Drives the pipeline on a fixed minutes-granularity interval, plus one
//! immediate cycle at startup. The scheduler is a two-state machine
//! (Idle / Running) with an explicit in-flight guard: a timer tick that
//! fires while a cycle is still running is a no-op, never a second
//! concurrent cycle.
//!
//! Each completed cycle publishes its aggregated text through a
//! `tokio::sync::watch` channel, so consumers always observe a fully
//! built string and replacement is atomic from their point of view.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::config;
use crate::pipeline::Pipeline;

/// Published when a cycle fails outside all per-source isolation
pub const CYCLE_FAILURE_TEXT: &str = "数据刷新失败，请检查网络或配置。";

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No cycle in flight
    Idle,
    /// A cycle is executing
    Running,
}

/// One schedulable unit of work producing the aggregated text
#[async_trait]
pub trait CycleDriver: Send + Sync {
    /// Run one full cycle
    ///
    /// # Errors
    ///
    /// Any error here is a whole-cycle failure; the scheduler publishes
    /// the fixed failure text and returns to Idle.
    async fn run_cycle(&self) -> anyhow::Result<String>;
}

/// Production driver: reload the config snapshot, run the pipeline
pub struct PipelineDriver {
    pipeline: Pipeline,
    config_path: PathBuf,
}

impl PipelineDriver {
    pub fn new(pipeline: Pipeline, config_path: PathBuf) -> Self {
        Self {
            pipeline,
            config_path,
        }
    }
}

#[async_trait]
impl CycleDriver for PipelineDriver {
    async fn run_cycle(&self) -> anyhow::Result<String> {
        // Fresh snapshot per cycle; the config collaborator owns the file
        let snapshot = config::load_or_default(&self.config_path);
        Ok(self.pipeline.run_cycle(&snapshot).await)
    }
}

/// Periodic refresh scheduler with an overlap guard
pub struct RefreshScheduler {
    driver: Arc<dyn CycleDriver>,
    interval: Duration,
    in_flight: AtomicBool,
    tx: watch::Sender<String>,
}

impl RefreshScheduler {
    /// Create a scheduler and the receiver consumers subscribe to
    pub fn new(
        driver: Arc<dyn CycleDriver>,
        interval_minutes: u64,
    ) -> (Arc<Self>, watch::Receiver<String>) {
        let (tx, rx) = watch::channel(String::new());
        let scheduler = Arc::new(Self {
            driver,
            interval: Duration::from_secs(interval_minutes.max(1) * 60),
            in_flight: AtomicBool::new(false),
            tx,
        });
        (scheduler, rx)
    }

    /// Current state
    pub fn state(&self) -> SchedulerState {
        if self.in_flight.load(Ordering::SeqCst) {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    /// Run one cycle unless one is already in flight
    ///
    /// Returns `false` when the tick was ignored because the scheduler
    /// was already Running. On completion (success or failure) the result
    /// is published and the scheduler returns to Idle.
    pub async fn try_cycle(&self) -> bool {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!("tick ignored, cycle already running");
            return false;
        }

        let text = match self.driver.run_cycle().await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = %err, "cycle failed");
                CYCLE_FAILURE_TEXT.to_string()
            }
        };

        self.tx.send_replace(text);
        self.in_flight.store(false, Ordering::SeqCst);
        true
    }

    /// Drive cycles forever: once at startup, then on every interval tick
    pub async fn run(self: Arc<Self>) {
        tracing::info!(interval_secs = self.interval.as_secs(), "scheduler started");
        self.try_cycle().await;

        let mut ticks = tokio::time::interval(self.interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of a fresh interval resolves immediately; the
        // startup cycle already covered it
        ticks.tick().await;

        loop {
            ticks.tick().await;
            self.try_cycle().await;
        }
    }
}
