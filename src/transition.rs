//! Time-interpolated attribute tweens

use std::time::{Duration, Instant};

/// Cubic in-out easing over `t` in `[0, 1]`
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// A numeric attribute moving from one value to another over time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start: Instant,
    pub duration: Duration,
}

impl Tween {
    pub fn new(from: f64, to: f64, start: Instant, duration: Duration) -> Self {
        Self { from, to, start, duration }
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let eased = ease_cubic_in_out(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Attribute that is either static or animating
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animated {
    Fixed(f64),
    Moving(Tween),
}

impl Animated {
    pub fn value_at(&self, now: Instant) -> f64 {
        match self {
            Animated::Fixed(v) => *v,
            Animated::Moving(tween) => tween.value_at(now),
        }
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        match self {
            Animated::Fixed(_) => true,
            Animated::Moving(tween) => tween.is_finished(now),
        }
    }

    /// Retarget, starting from whatever is displayed at `now`
    pub fn animate_to(&mut self, to: f64, now: Instant, duration: Duration) {
        let from = self.value_at(now);
        *self = Animated::Moving(Tween::new(from, to, now, duration));
    }
}
