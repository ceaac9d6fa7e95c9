use crate::foundation::error::{ScuderiaError, ScuderiaResult};
use crate::launch::effects::EngineEffects;
use crate::launch::profile::{LaunchProfile, MotionPlan};

/// Phase of the launch state machine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum LaunchPhase {
    /// Waiting for "start engine"; the start control is visible.
    Idle,
    /// Car is moving.
    Running {
        /// Timestamp captured on start.
        started_at_ms: f64,
    },
    /// Run finished; holding the final pose until `until_ms`.
    Cooldown {
        /// Reset deadline.
        until_ms: f64,
    },
}

/// Per-frame kinematic state. All zero while idle.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Kinematics {
    /// Fraction of the run elapsed, `[0, 1]`.
    pub progress: f64,
    /// Distance covered, in travel units.
    pub position: f64,
    /// Current speed, in travel units per second.
    pub velocity: f64,
    /// Accumulated wheel rotation in degrees; never decreases during a run.
    pub rotation_deg: f64,
    /// `velocity / max_speed`, clamped to `[0, 1]`.
    pub engine_intensity: f64,
}

/// Timestamp-driven "start engine" run: `Idle -> Running -> Cooldown -> Idle`.
///
/// Only one run can be active at a time; starting while running or cooling down is rejected.
#[derive(Clone, Debug)]
pub struct LaunchSequence {
    profile: LaunchProfile,
    plan: MotionPlan,
    phase: LaunchPhase,
    kinematics: Kinematics,
}

impl LaunchSequence {
    /// Create an idle sequence for a validated profile.
    pub fn new(profile: LaunchProfile) -> ScuderiaResult<Self> {
        let plan = profile.plan()?;
        Ok(Self {
            profile,
            plan,
            phase: LaunchPhase::Idle,
            kinematics: Kinematics::default(),
        })
    }

    /// Profile in use.
    pub fn profile(&self) -> &LaunchProfile {
        &self.profile
    }

    /// Current phase.
    pub fn phase(&self) -> LaunchPhase {
        self.phase
    }

    /// Kinematics as of the last tick.
    pub fn kinematics(&self) -> Kinematics {
        self.kinematics
    }

    /// The start control is only offered while idle.
    pub fn start_visible(&self) -> bool {
        matches!(self.phase, LaunchPhase::Idle)
    }

    /// `true` while the car is moving.
    pub fn is_rolling(&self) -> bool {
        matches!(self.phase, LaunchPhase::Running { .. })
    }

    /// Decorative effects for the current state.
    pub fn effects(&self) -> EngineEffects {
        EngineEffects::derive(&self.kinematics, self.is_rolling(), &self.profile.effects)
    }

    /// Begin a run at `now_ms`.
    pub fn start(&mut self, now_ms: f64) -> ScuderiaResult<()> {
        if !now_ms.is_finite() {
            return Err(ScuderiaError::validation("launch start time must be finite"));
        }
        match self.phase {
            LaunchPhase::Idle => {
                self.kinematics = Kinematics::default();
                self.phase = LaunchPhase::Running {
                    started_at_ms: now_ms,
                };
                tracing::debug!(now_ms, "launch started");
                Ok(())
            }
            LaunchPhase::Running { .. } => {
                Err(ScuderiaError::state("launch already running"))
            }
            LaunchPhase::Cooldown { .. } => {
                Err(ScuderiaError::state("launch is cooling down"))
            }
        }
    }

    /// Advance to `now_ms` and return the resulting kinematics.
    pub fn tick(&mut self, now_ms: f64) -> Kinematics {
        if !now_ms.is_finite() {
            return self.kinematics;
        }

        match self.phase {
            LaunchPhase::Idle => {}
            LaunchPhase::Running { started_at_ms } => self.advance_run(started_at_ms, now_ms),
            LaunchPhase::Cooldown { until_ms } => {
                if now_ms >= until_ms {
                    self.kinematics = Kinematics::default();
                    self.phase = LaunchPhase::Idle;
                    tracing::debug!(now_ms, "launch reset");
                }
            }
        }
        self.kinematics
    }

    fn advance_run(&mut self, started_at_ms: f64, now_ms: f64) {
        let elapsed = (now_ms - started_at_ms).max(0.0);
        let progress = (elapsed / self.profile.duration_ms).min(1.0);
        let finished = progress >= 1.0;

        let (position, velocity) = if finished {
            (self.profile.travel, 0.0)
        } else {
            self.plan.state_at(elapsed)
        };
        let prev = self.kinematics;
        let position = position.max(prev.position);
        let rotation_deg = prev.rotation_deg
            + (position - prev.position) / self.profile.wheel_circumference * 360.0;

        self.kinematics = Kinematics {
            progress: progress.max(prev.progress),
            position,
            velocity: velocity.min(self.profile.max_speed),
            rotation_deg,
            engine_intensity: (velocity / self.profile.max_speed).clamp(0.0, 1.0),
        };

        if finished {
            self.phase = LaunchPhase::Cooldown {
                until_ms: now_ms + self.profile.cooldown_ms,
            };
            tracing::debug!(now_ms, rotation_deg, "launch finished");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/launch/sequence.rs"]
mod tests;
