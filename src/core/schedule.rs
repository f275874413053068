use chrono::{Local, NaiveDateTime};
use std::io::Write;
use std::time::Duration;

/// Countdown poll cadence. Liveness for the operator, not precision.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Once the remaining delay is inside this window, stop polling and block for
/// the exact residual.
const DISPATCH_WINDOW: Duration = Duration::from_secs(2);

/// One-shot trigger: fires exactly once at `target + fire_early_secs`, then
/// is consumed. No cancellation, no re-arm; once armed the only exits are
/// firing or process termination.
#[derive(Debug)]
pub struct OneShotTrigger {
    target: NaiveDateTime,
    fire_early_secs: f64,
}

impl OneShotTrigger {
    pub fn new(target: NaiveDateTime, fire_early_secs: f64) -> Self {
        Self {
            target,
            fire_early_secs,
        }
    }

    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    /// Remaining delay from `now` to the adjusted fire instant. Pure, so the
    /// arithmetic is checkable with an injected clock.
    pub fn delay_from(&self, now: NaiveDateTime) -> Duration {
        let until_target = (self.target - now).num_milliseconds() as f64 / 1000.0;
        let secs = until_target + self.fire_early_secs;
        if secs <= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(secs)
        }
    }

    /// Cooperatively waits until the fire instant, rewriting a single console
    /// line with the remaining time once per second. Consuming `self` is what
    /// makes the trigger one-shot.
    pub async fn wait(self) {
        loop {
            let now = Local::now().naive_local();
            let remaining = self.delay_from(now);

            if remaining <= DISPATCH_WINDOW {
                tokio::time::sleep(remaining).await;
                return;
            }

            let countdown = self.target - now;
            print!(
                "\rTime remaining: {:02}:{:02}:{:02}",
                countdown.num_hours(),
                countdown.num_minutes() % 60,
                countdown.num_seconds() % 60
            );
            let _ = std::io::stdout().flush();

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
