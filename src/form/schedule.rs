use std::time::Duration;

use futures_timer::Delay;

/// A fire-and-forget delayed UI action. The host drives the future; dropping
/// it before completion cancels the action. The body is expected to check
/// that its target still exists and no-op otherwise.
pub struct ScheduledEffect {
    delay: Duration,
    action: Box<dyn FnOnce() + Send + 'static>,
}

impl ScheduledEffect {
    pub fn new(delay: Duration, action: impl FnOnce() + Send + 'static) -> Self {
        Self {
            delay,
            action: Box::new(action),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn run(self) {
        Delay::new(self.delay).await;
        (self.action)();
    }

    /// Skips the delay. Used when tearing a view down and in tests.
    pub fn fire_now(self) {
        (self.action)();
    }
}

impl std::fmt::Debug for ScheduledEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledEffect")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn effect_runs_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let effect = {
            let fired = fired.clone();
            ScheduledEffect::new(Duration::from_millis(1), move || {
                fired.fetch_add(1, Ordering::SeqCst);
            })
        };
        block_on(effect.run());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropped_effect_never_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let effect = {
            let fired = fired.clone();
            ScheduledEffect::new(Duration::from_millis(1), move || {
                fired.fetch_add(1, Ordering::SeqCst);
            })
        };
        drop(effect);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fire_now_skips_the_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let effect = {
            let fired = fired.clone();
            ScheduledEffect::new(Duration::from_secs(3600), move || {
                fired.fetch_add(1, Ordering::SeqCst);
            })
        };
        effect.fire_now();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
