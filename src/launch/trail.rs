use crate::animation::tween::{Repeat, Tween};
use crate::foundation::error::ScuderiaResult;

/// Speed lines behind the car.
pub const SPEED_LINE_COUNT: usize = 12;
/// Road dust puffs under the rear wheels.
pub const DUST_COUNT: usize = 6;

const SPEED_LINE_PERIOD_MS: f64 = 200.0;
const SPEED_LINE_STAGGER_MS: f64 = 30.0;
const DUST_PERIOD_MS: f64 = 800.0;
const DUST_STAGGER_MS: f64 = 100.0;

/// One speed line for one frame. `x` is in pixels relative to the car.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Streak {
    pub x: f64,
    pub opacity: f64,
}

/// One dust puff for one frame. Offsets are in pixels relative to the wheel.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct DustPuff {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub scale: f64,
}

/// Looping streaks and dust drawn while the car rolls. Empty when it is not.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct TrailFrame {
    pub speed_lines: Vec<Streak>,
    pub dust: Vec<DustPuff>,
}

impl TrailFrame {
    /// `true` when nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.speed_lines.is_empty() && self.dust.is_empty()
    }
}

/// Staggered, endlessly repeating tweens mounted when a run starts.
///
/// Element `i` of each group starts `i * stagger` after the run does and then loops.
#[derive(Clone, Debug)]
pub struct LaunchTrail {
    // x, opacity
    streaks: Vec<[Tween; 2]>,
    // x, y, opacity, scale
    dust: Vec<[Tween; 4]>,
}

fn looped(values: Vec<f64>, period_ms: f64, index: usize, stagger_ms: f64) -> ScuderiaResult<Tween> {
    Ok(Tween::new(values, period_ms)?
        .with_repeat(Repeat::Forever)
        .staggered(index, stagger_ms))
}

impl LaunchTrail {
    /// Trail with `speed_lines` streaks and `dust` puffs.
    pub fn new(speed_lines: usize, dust: usize) -> ScuderiaResult<Self> {
        let streaks = (0..speed_lines)
            .map(|i| -> ScuderiaResult<[Tween; 2]> {
                let period = SPEED_LINE_PERIOD_MS;
                Ok([
                    looped(vec![-50.0, -120.0], period, i, SPEED_LINE_STAGGER_MS)?,
                    looped(vec![0.0, 1.0, 0.0], period, i, SPEED_LINE_STAGGER_MS)?,
                ])
            })
            .collect::<ScuderiaResult<Vec<_>>>()?;
        let dust = (0..dust)
            .map(|i| -> ScuderiaResult<[Tween; 4]> {
                let period = DUST_PERIOD_MS;
                Ok([
                    looped(vec![-10.0, -60.0], period, i, DUST_STAGGER_MS)?,
                    looped(vec![0.0, -20.0, -10.0], period, i, DUST_STAGGER_MS)?,
                    looped(vec![0.0, 0.8, 0.0], period, i, DUST_STAGGER_MS)?,
                    looped(vec![0.5, 1.0, 0.3], period, i, DUST_STAGGER_MS)?,
                ])
            })
            .collect::<ScuderiaResult<Vec<_>>>()?;
        Ok(Self { streaks, dust })
    }

    /// The site's trail: 12 speed lines and 6 dust puffs.
    pub fn site_default() -> ScuderiaResult<Self> {
        Self::new(SPEED_LINE_COUNT, DUST_COUNT)
    }

    /// Sample every element `elapsed_ms` after the run started.
    pub fn sample(&self, elapsed_ms: f64) -> TrailFrame {
        TrailFrame {
            speed_lines: self
                .streaks
                .iter()
                .map(|[x, opacity]| Streak {
                    x: x.sample(elapsed_ms),
                    opacity: opacity.sample(elapsed_ms),
                })
                .collect(),
            dust: self
                .dust
                .iter()
                .map(|[x, y, opacity, scale]| DustPuff {
                    x: x.sample(elapsed_ms),
                    y: y.sample(elapsed_ms),
                    opacity: opacity.sample(elapsed_ms),
                    scale: scale.sample(elapsed_ms),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/launch/trail.rs"]
mod tests;
