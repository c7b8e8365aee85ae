//! Eased transition of the wizard's progress bar

use std::time::{Duration, Instant};

/// Animates the progress bar from one percentage to another
#[derive(Debug, Clone)]
pub struct ProgressAnimation {
    start_time: Instant,
    from: u8,
    to: u8,
}

impl ProgressAnimation {
    /// Duration of the fill transition
    const DURATION: Duration = Duration::from_millis(300);

    pub fn new(from: u8, to: u8) -> Self {
        Self::starting_at(from, to, Instant::now())
    }

    /// A bar already resting at `value`
    pub fn settled(value: u8) -> Self {
        let now = Instant::now();
        Self::starting_at(value, value, now.checked_sub(Self::DURATION).unwrap_or(now))
    }

    fn starting_at(from: u8, to: u8, start_time: Instant) -> Self {
        Self {
            start_time,
            from,
            to,
        }
    }

    /// Start a new transition from wherever the bar currently is
    pub fn retarget(&mut self, to: u8) {
        if to == self.to {
            return;
        }
        let from = self.current().round() as u8;
        *self = Self::new(from, to);
    }

    /// Percentage the animation is heading to
    pub fn target(&self) -> u8 {
        self.to
    }

    pub fn is_running(&self) -> bool {
        self.start_time.elapsed() < Self::DURATION && self.from != self.to
    }

    /// Current percentage, eased
    pub fn current(&self) -> f32 {
        self.value_at(self.start_time.elapsed())
    }

    fn value_at(&self, elapsed: Duration) -> f32 {
        let t = (elapsed.as_secs_f32() / Self::DURATION.as_secs_f32()).clamp(0.0, 1.0);
        // Ease in and out, like a CSS ease-in-out width transition
        let eased = simple_easing::cubic_in_out(t);
        let from = f32::from(self.from);
        let to = f32::from(self.to);
        from + (to - from) * eased
    }
}

impl Default for ProgressAnimation {
    fn default() -> Self {
        Self::settled(0)
    }
}
