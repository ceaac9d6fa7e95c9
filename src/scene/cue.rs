use crate::animation::tween::{Repeat, Tween};
use crate::foundation::error::ScuderiaResult;

/// "Scroll to explore" indicator under the hero for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ScrollCue {
    /// Fades in once after the hero settles.
    pub opacity: f64,
    /// Bounce offset in pixels.
    pub y: f64,
}

/// Clock-driven scroll indicator: a one-off fade-in plus an endless bounce.
#[derive(Clone, Debug)]
pub struct ScrollCueMotion {
    fade: Tween,
    bounce: Tween,
}

impl ScrollCueMotion {
    /// Fade in over 500 ms after 1500 ms; bounce `0 -> 10 -> 0` px every 1500 ms.
    pub fn site_default() -> ScuderiaResult<Self> {
        Ok(Self {
            fade: Tween::new(vec![0.0, 1.0], 500.0)?.with_delay(1500.0),
            bounce: Tween::new(vec![0.0, 10.0, 0.0], 1500.0)?.with_repeat(Repeat::Forever),
        })
    }

    pub fn sample(&self, clock_ms: f64) -> ScrollCue {
        ScrollCue {
            opacity: self.fade.sample(clock_ms),
            y: self.bounce.sample(clock_ms),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/cue.rs"]
mod tests;
