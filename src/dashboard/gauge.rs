use crate::animation::ease::Ease;
use crate::animation::tween::Tween;
use crate::foundation::error::{ScuderiaError, ScuderiaResult};

const LEVEL_STEP_MS: f64 = 200.0;
const BAR_MS: f64 = 1500.0;
const NEEDLE_MS: f64 = 2000.0;

/// Skill gauge: a percentage label plus an easing bar.
///
/// The label jumps to `level` after `index * 200 ms`. The bar tween carries its own
/// `index * 200 ms` delay, which only starts once the label has stepped.
#[derive(Clone, Debug, PartialEq)]
pub struct Gauge {
    level: f64,
    index: usize,
    bar: Tween,
}

impl Gauge {
    pub fn new(level: f64, index: usize) -> ScuderiaResult<Self> {
        if !(level.is_finite() && (0.0..=100.0).contains(&level)) {
            return Err(ScuderiaError::validation("gauge level must be in [0, 100]"));
        }
        let step = index as f64 * LEVEL_STEP_MS;
        let bar = Tween::new(vec![0.0, level], BAR_MS)?
            .with_ease(Ease::OutCubic)
            .with_delay(step * 2.0);
        Ok(Self { level, index, bar })
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Percentage shown in the label.
    pub fn displayed_level(&self, elapsed_ms: f64) -> f64 {
        if elapsed_ms >= self.index as f64 * LEVEL_STEP_MS {
            self.level
        } else {
            0.0
        }
    }

    /// Bar width in percent of the track.
    pub fn bar_width(&self, elapsed_ms: f64) -> f64 {
        self.bar.sample(elapsed_ms)
    }

    pub fn reading(&self, elapsed_ms: f64) -> GaugeReading {
        GaugeReading {
            level: self.displayed_level(elapsed_ms),
            width: self.bar_width(elapsed_ms),
        }
    }
}

/// One gauge at one instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GaugeReading {
    pub level: f64,
    pub width: f64,
}

/// Half-dial speedometer whose needle sweeps from -90° to its reading on mount.
#[derive(Clone, Debug, PartialEq)]
pub struct Speedometer {
    value: f64,
    max: f64,
    needle: Tween,
}

impl Speedometer {
    pub fn new(value: f64, max: f64) -> ScuderiaResult<Self> {
        if !(max.is_finite() && max > 0.0) {
            return Err(ScuderiaError::validation(
                "speedometer max must be finite and > 0",
            ));
        }
        if !value.is_finite() {
            return Err(ScuderiaError::validation("speedometer value must be finite"));
        }
        let target = value / max * 180.0 - 90.0;
        let needle = Tween::new(vec![-90.0, target], NEEDLE_MS)?.with_ease(Ease::OutCubic);
        Ok(Self { value, max, needle })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Resting needle angle in degrees.
    pub fn target_deg(&self) -> f64 {
        self.value / self.max * 180.0 - 90.0
    }

    /// Needle angle at `elapsed_ms` since mount.
    pub fn needle_deg(&self, elapsed_ms: f64) -> f64 {
        self.needle.sample(elapsed_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dashboard/gauge.rs"]
mod tests;
