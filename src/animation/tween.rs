use crate::animation::ease::Ease;
use crate::foundation::error::{ScuderiaError, ScuderiaResult};

/// What happens after a tween reaches its last keyframe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Hold the last value.
    #[default]
    Once,
    /// Restart from the first keyframe.
    Forever,
}

/// Time-based keyframe tween with evenly spaced keyframes.
///
/// The first value is held during the delay; `ease` applies inside each keyframe segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    values: Vec<f64>,
    duration_ms: f64,
    delay_ms: f64,
    repeat: Repeat,
    ease: Ease,
}

impl Tween {
    /// Tween through `values` over `duration_ms`.
    pub fn new(values: Vec<f64>, duration_ms: f64) -> ScuderiaResult<Self> {
        let t = Self {
            values,
            duration_ms,
            delay_ms: 0.0,
            repeat: Repeat::Once,
            ease: Ease::Linear,
        };
        t.validate()?;
        Ok(t)
    }

    /// Validate keyframes and timing.
    pub fn validate(&self) -> ScuderiaResult<()> {
        if self.values.is_empty() {
            return Err(ScuderiaError::animation("tween needs at least one keyframe"));
        }
        if !self.values.iter().all(|v| v.is_finite()) {
            return Err(ScuderiaError::animation("tween keyframes must be finite"));
        }
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(ScuderiaError::animation(
                "tween duration must be finite and > 0",
            ));
        }
        if !(self.delay_ms.is_finite() && self.delay_ms >= 0.0) {
            return Err(ScuderiaError::animation("tween delay must be finite and >= 0"));
        }
        Ok(())
    }

    /// Set the start delay.
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    /// Set the repeat mode.
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set the per-segment easing.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Add `index * step_ms` to the delay, for staggered groups.
    pub fn staggered(self, index: usize, step_ms: f64) -> Self {
        let delay = self.delay_ms + index as f64 * step_ms;
        self.with_delay(delay)
    }

    /// Start delay in milliseconds.
    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Duration of one pass in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// `true` once a non-repeating tween has reached its last keyframe.
    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        self.repeat == Repeat::Once && elapsed_ms >= self.delay_ms + self.duration_ms
    }

    /// Sample at `elapsed_ms` since the tween was mounted.
    pub fn sample(&self, elapsed_ms: f64) -> f64 {
        let local = elapsed_ms - self.delay_ms;
        if local.is_nan() || local <= 0.0 || self.values.len() == 1 {
            return self.values[0];
        }

        let mut t = local / self.duration_ms;
        match self.repeat {
            Repeat::Once => {
                if t >= 1.0 {
                    return self.values[self.values.len() - 1];
                }
            }
            Repeat::Forever => t = t.fract(),
        }

        let segments = self.values.len() - 1;
        let pos = t * segments as f64;
        let i = (pos.floor() as usize).min(segments - 1);
        let u = self.ease.apply(pos - i as f64);
        let (a, b) = (self.values[i], self.values[i + 1]);
        a + (b - a) * u
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
