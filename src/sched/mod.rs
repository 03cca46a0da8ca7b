mod projector;
mod rollover;


pub use projector::{DueBuckets, DueItem, EventType, ProjectError, project_all, project_entry};

use chrono::{DateTime, Local, Timelike};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};

use crate::app_context::AppContext;
use crate::config::RuntimeConfig;
use crate::dispatch::Dispatcher;
use crate::entry_store::{EntryStore, StoreError};
use crate::webwatch::{HttpPageProbe, WebWatcher};

use rollover::RolloverState;

/// Unrecoverable scheduling failures. Dispatch and watcher problems are
/// handled inside the loop; only a bad store or a bad data set ends the
/// worker, on the expectation that a supervisor restarts the process once
/// the data is fixed.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Projection(#[from] ProjectError),
}

/// Spawns the single scheduler worker. The returned channel yields at most
/// one message: the error that stopped the worker.
pub fn start_scheduler_job(
    app_context: AppContext,
    dispatcher: Dispatcher,
) -> mpsc::Receiver<SchedulerError> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let mut scheduler = Scheduler::new(app_context, dispatcher);
        if let Err(error) = scheduler.run().await {
            log::error!("scheduler stopped: {}", error);
            let _ = tx.send(error).await;
        }
    });
    rx
}

pub struct Scheduler {
    app_context: AppContext,
    store: EntryStore,
    dispatcher: Dispatcher,
    probe: HttpPageProbe,
    rollover: RolloverState,
    buckets: DueBuckets,
    watcher: WebWatcher,
    poll_interval: Duration,
    /// None until the first tick, so the watcher runs immediately.
    web_elapsed: Option<Duration>,
}

impl Scheduler {
    pub fn new(app_context: AppContext, dispatcher: Dispatcher) -> Self {
        let store = EntryStore::new(&app_context.config.data_file);
        let watcher = WebWatcher::new(app_context.config.web_check.clone());
        let poll_interval = Duration::from_secs(app_context.config.poll_interval_secs);
        Self {
            app_context,
            store,
            dispatcher,
            probe: HttpPageProbe::new(),
            rollover: RolloverState::default(),
            buckets: DueBuckets::default(),
            watcher,
            poll_interval,
            web_elapsed: None,
        }
    }

    pub async fn run(&mut self) -> Result<(), SchedulerError> {
        log::info!("infinite scheduler loop");
        if let Some(url) = self.watcher.monitored_url() {
            log::info!("url to check is set to {}", url);
        }
        loop {
            let runtime = self.app_context.runtime_config.read().await.clone();
            self.watcher.apply_config(&runtime.web_check);

            let now = Local::now();
            self.tick_at(now, &runtime).await?;
            self.maybe_check_site(&runtime).await;

            sleep(self.poll_interval).await;
            if let Some(elapsed) = &mut self.web_elapsed {
                *elapsed += self.poll_interval;
            }
        }
    }

    /// Steps 1-4 of the poll cycle: rollover observation (reload and
    /// re-project on a day change) and the alarm-hour dispatch gate.
    pub(crate) async fn tick_at(
        &mut self,
        now: DateTime<Local>,
        runtime: &RuntimeConfig,
    ) -> Result<(), SchedulerError> {
        if self.rollover.observe(now) {
            self.reschedule(now)?;
        }
        if self.buckets.has_items() && now.hour() >= runtime.alarm_hour {
            log::info!("time to send an alarm {}", now);
            self.dispatch_due().await;
        }
        Ok(())
    }

    fn reschedule(&mut self, now: DateTime<Local>) -> Result<(), SchedulerError> {
        let list = self.store.load()?;
        self.buckets = project_all(&list.list, now)?;
        Ok(())
    }

    /// Clears a bucket only after its dispatch fully succeeded; on failure
    /// the items stay put and the next tick retries.
    async fn dispatch_due(&mut self) {
        if !self.buckets.birthdays.is_empty() {
            match self
                .dispatcher
                .dispatch_due(EventType::Birthday, &self.buckets.birthdays)
                .await
            {
                Ok(()) => self.buckets.birthdays.clear(),
                Err(error) => {
                    log::warn!("birthday dispatch failed, will retry next tick: {}", error);
                }
            }
        }
        if !self.buckets.anniversaries.is_empty() {
            match self
                .dispatcher
                .dispatch_due(EventType::Anniversary, &self.buckets.anniversaries)
                .await
            {
                Ok(()) => self.buckets.anniversaries.clear(),
                Err(error) => {
                    log::warn!(
                        "anniversary dispatch failed, will retry next tick: {}",
                        error
                    );
                }
            }
        }
    }

    async fn maybe_check_site(&mut self, runtime: &RuntimeConfig) {
        let cadence = Duration::from_secs(runtime.web_check.interval_secs);
        let due = match self.web_elapsed {
            None => true,
            Some(elapsed) => elapsed > cadence,
        };
        if !due {
            return;
        }
        if let Err(error) = self.watcher.check(&self.probe, &self.dispatcher).await {
            log::warn!("web check failed, treated as no change: {}", error);
        }
        self.web_elapsed = Some(Duration::ZERO);
    }
}
