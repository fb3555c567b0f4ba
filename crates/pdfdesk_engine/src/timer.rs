use std::future::Future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Cancellable periodic callback on the current tokio runtime.
///
/// At most one timer runs per instance: `start` cancels the previous one.
/// `cancel` may be called any number of times.
#[derive(Debug, Default)]
pub struct PeriodicTimer {
    active: Option<CancellationToken>,
}

impl PeriodicTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// First tick fires one `period` after the call.
    pub fn start<F>(&mut self, period: Duration, mut on_tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.cancel();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticks.tick() => on_tick(),
                }
            }
        });
        self.active = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.active.take() {
            token.cancel();
        }
    }
}

impl Drop for PeriodicTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run `action` once after `delay`. Not cancellable.
pub fn run_after<F>(delay: Duration, action: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        action.await;
    });
}
