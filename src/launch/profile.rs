use crate::animation::ease::Ease;
use crate::foundation::error::{ScuderiaError, ScuderiaResult};
use crate::launch::effects::EffectScaling;

// Absorbs float noise when comparing derived speeds against configured limits.
const EPS: f64 = 1e-9;

/// How the car covers its travel distance during a run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccelCurve {
    /// Cubic ease-out applied to position: fastest at launch, settling into the finish.
    EaseOutCubic,
    /// Constant acceleration up to a cruise speed, cruise, then linear braking to rest over the
    /// last `decel_ms`. Cruise speed is solved so the run covers exactly the travel distance.
    LinearCapped {
        /// Acceleration in travel units per second squared.
        acceleration: f64,
        /// Length of the braking phase at the end of the run.
        decel_ms: f64,
    },
}

/// Parameters of one launch run.
///
/// Distances are in travel units (percent of the container width on the site); speeds are in
/// travel units per second.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchProfile {
    /// Length of the run.
    pub duration_ms: f64,
    /// Distance covered by the end of the run.
    pub travel: f64,
    /// Speed limit; also the speed at which engine intensity saturates.
    pub max_speed: f64,
    /// Distance per wheel revolution.
    pub wheel_circumference: f64,
    /// Pause after the run before everything resets.
    pub cooldown_ms: f64,
    /// Acceleration model.
    pub curve: AccelCurve,
    /// Decorative signal scaling.
    pub effects: EffectScaling,
}

impl Default for LaunchProfile {
    fn default() -> Self {
        Self {
            duration_ms: 4500.0,
            travel: 120.0,
            max_speed: 80.0,
            wheel_circumference: 6.0,
            cooldown_ms: 2000.0,
            curve: AccelCurve::LinearCapped {
                acceleration: 60.0,
                decel_ms: 1000.0,
            },
            effects: EffectScaling::default(),
        }
    }
}

impl LaunchProfile {
    /// Validate ranges and that the curve can cover `travel` within `max_speed`.
    pub fn validate(&self) -> ScuderiaResult<()> {
        self.plan().map(|_| ())
    }

    pub(crate) fn plan(&self) -> ScuderiaResult<MotionPlan> {
        positive("launch duration_ms", self.duration_ms)?;
        positive("launch travel", self.travel)?;
        positive("launch max_speed", self.max_speed)?;
        positive("launch wheel_circumference", self.wheel_circumference)?;
        if !(self.cooldown_ms.is_finite() && self.cooldown_ms >= 0.0) {
            return Err(ScuderiaError::validation(
                "launch cooldown_ms must be finite and >= 0",
            ));
        }
        self.effects.validate()?;

        let duration_s = self.duration_ms / 1000.0;
        match self.curve {
            AccelCurve::EaseOutCubic => {
                let peak = 3.0 * self.travel / duration_s;
                if peak > self.max_speed + EPS {
                    return Err(ScuderiaError::validation(format!(
                        "ease-out launch peaks at {peak:.3} but max_speed is {}",
                        self.max_speed
                    )));
                }
                Ok(MotionPlan::EaseOutCubic {
                    travel: self.travel,
                    duration_s,
                })
            }
            AccelCurve::LinearCapped {
                acceleration,
                decel_ms,
            } => {
                positive("launch acceleration", acceleration)?;
                positive("launch decel_ms", decel_ms)?;
                if decel_ms >= self.duration_ms {
                    return Err(ScuderiaError::validation(
                        "launch decel_ms must be shorter than duration_ms",
                    ));
                }

                // Cruise speed v solves travel = v*T' - v^2/(2a) with T' = T - td/2; take the
                // smaller root so the acceleration phase ends as early as possible.
                let a = acceleration;
                let decel_s = decel_ms / 1000.0;
                let t_eff = duration_s - decel_s / 2.0;
                let disc = (a * t_eff).powi(2) - 2.0 * a * self.travel;
                if disc < 0.0 {
                    return Err(ScuderiaError::validation(format!(
                        "acceleration {a} is too low to cover travel {} in {} ms",
                        self.travel, self.duration_ms
                    )));
                }
                let cruise = a * t_eff - disc.sqrt();
                let accel_s = cruise / a;
                let decel_start_s = duration_s - decel_s;
                if accel_s > decel_start_s + EPS {
                    return Err(ScuderiaError::validation(
                        "launch acceleration phase overlaps the braking phase",
                    ));
                }
                if cruise > self.max_speed + EPS {
                    return Err(ScuderiaError::validation(format!(
                        "launch cruise speed {cruise:.3} exceeds max_speed {}",
                        self.max_speed
                    )));
                }

                let accel_dist = 0.5 * a * accel_s * accel_s;
                Ok(MotionPlan::Trapezoid {
                    acceleration: a,
                    cruise,
                    accel_s,
                    decel_start_s,
                    decel_s,
                    accel_dist,
                    cruise_end_dist: accel_dist + cruise * (decel_start_s - accel_s),
                    duration_s,
                })
            }
        }
    }
}

fn positive(what: &str, v: f64) -> ScuderiaResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ScuderiaError::validation(format!(
            "{what} must be finite and > 0"
        )))
    }
}

/// Precomputed closed-form motion for a validated profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MotionPlan {
    EaseOutCubic {
        travel: f64,
        duration_s: f64,
    },
    Trapezoid {
        acceleration: f64,
        cruise: f64,
        accel_s: f64,
        decel_start_s: f64,
        decel_s: f64,
        accel_dist: f64,
        cruise_end_dist: f64,
        duration_s: f64,
    },
}

impl MotionPlan {
    /// `(position, velocity)` at `elapsed_ms` into the run.
    pub(crate) fn state_at(&self, elapsed_ms: f64) -> (f64, f64) {
        match *self {
            Self::EaseOutCubic { travel, duration_s } => {
                let p = (elapsed_ms / 1000.0 / duration_s).clamp(0.0, 1.0);
                let position = travel * Ease::OutCubic.apply(p);
                let velocity = 3.0 * travel * (1.0 - p).powi(2) / duration_s;
                (position, velocity)
            }
            Self::Trapezoid {
                acceleration,
                cruise,
                accel_s,
                decel_start_s,
                decel_s,
                accel_dist,
                cruise_end_dist,
                duration_s,
            } => {
                let t = (elapsed_ms / 1000.0).clamp(0.0, duration_s);
                if t < accel_s {
                    (0.5 * acceleration * t * t, acceleration * t)
                } else if t < decel_start_s {
                    (accel_dist + cruise * (t - accel_s), cruise)
                } else {
                    let u = t - decel_start_s;
                    let braking = cruise / decel_s;
                    (
                        cruise_end_dist + cruise * u - 0.5 * braking * u * u,
                        (cruise - braking * u).max(0.0),
                    )
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/launch/profile.rs"]
mod tests;
