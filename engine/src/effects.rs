//! Timed UI effects.

use std::time::Duration;

/// How long the solved-round pop runs.
pub const SUCCESS_EFFECT_DURATION: Duration = Duration::from_millis(450);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimPhase {
    Running { progress: f32 },
    Completed,
}

fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
struct EffectTimer {
    elapsed: Duration,
    duration: Duration,
}

impl EffectTimer {
    fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    fn phase(&self) -> AnimPhase {
        if self.elapsed >= self.duration {
            AnimPhase::Completed
        } else {
            AnimPhase::Running {
                progress: normalized_progress(self.elapsed, self.duration),
            }
        }
    }
}

/// Bounce played on the quiz panel when a round is solved.
#[derive(Debug, Clone)]
pub struct SuccessEffect {
    timer: EffectTimer,
}

impl SuccessEffect {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            timer: EffectTimer::new(duration),
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.timer.advance(delta);
    }

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        self.timer.phase()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase(), AnimPhase::Completed)
    }
}
