use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::common::{ApplicationError, ApplicationResult};

/// Returned by a tick callback to keep or end its timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// A fixed-period timer running one callback on the tokio runtime.
///
/// At most one timer task exists per `PeriodicTask`: starting again aborts
/// the previous task first, and dropping the value aborts it too. The first
/// tick fires one full period after `start`.
pub struct PeriodicTask {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    pub fn new(name: &'static str) -> Self {
        Self { name, handle: None }
    }

    pub fn start<F>(&mut self, period: Duration, mut on_tick: F) -> ApplicationResult<()>
    where
        F: FnMut() -> TickControl + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ApplicationError::Scheduler(format!("{} timer needs a tokio runtime: {}", self.name, e)))?;
        self.stop();

        let period = period.max(Duration::from_millis(1));
        let name = self.name;
        self.handle = Some(runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if on_tick() == TickControl::Stop {
                    debug!(timer = name, "timer finished");
                    break;
                }
            }
        }));
        debug!(timer = name, period_ms = period.as_millis() as u64, "timer started");
        Ok(())
    }

    /// Abort the running timer, if any. Returns whether one was active.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                if was_running {
                    debug!(timer = self.name, "timer stopped");
                }
                was_running
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
