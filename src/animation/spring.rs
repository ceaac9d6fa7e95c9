use crate::foundation::error::{ScuderiaError, ScuderiaResult};

/// Largest integration step; larger frame deltas are split so results do not depend on frame rate.
const MAX_SUBSTEP_MS: f64 = 1.0;

/// Frame gaps longer than this (a backgrounded tab, a clock jump) land directly on the target.
const SETTLE_HORIZON_MS: f64 = 10_000.0;

/// Coefficients of a damped second-order spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpringConfig {
    /// Restoring force per unit of displacement.
    pub stiffness: f64,
    /// Opposing force per unit of velocity.
    pub damping: f64,
    /// Moving mass.
    pub mass: f64,
    /// Distance to target under which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed under which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }
}

impl SpringConfig {
    /// Config with the given stiffness and damping and default mass/rest thresholds.
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            ..Self::default()
        }
    }

    /// Validate coefficient ranges.
    pub fn validate(&self) -> ScuderiaResult<()> {
        let all_finite = [
            self.stiffness,
            self.damping,
            self.mass,
            self.rest_delta,
            self.rest_speed,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(ScuderiaError::animation("spring coefficients must be finite"));
        }
        if self.stiffness <= 0.0 {
            return Err(ScuderiaError::animation("spring stiffness must be > 0"));
        }
        if self.mass <= 0.0 {
            return Err(ScuderiaError::animation("spring mass must be > 0"));
        }
        if self.damping < 0.0 {
            return Err(ScuderiaError::animation("spring damping must be >= 0"));
        }
        if self.rest_delta < 0.0 || self.rest_speed < 0.0 {
            return Err(ScuderiaError::animation("spring rest thresholds must be >= 0"));
        }
        Ok(())
    }

    /// `damping / (2 * sqrt(stiffness * mass))`; values `>= 1` never overshoot from rest.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Stateful spring that eases a value toward a changing target.
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// Create a spring at rest on `initial`.
    pub fn new(config: SpringConfig, initial: f64) -> ScuderiaResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        })
    }

    /// Coefficients in use.
    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Current smoothed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Value the spring is heading to.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Retarget without touching position or velocity.
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Teleport to `v` and stop.
    pub fn jump(&mut self, v: f64) {
        self.value = v;
        self.target = v;
        self.velocity = 0.0;
    }

    /// `true` once settled on the target.
    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance by `dt_ms` and return the new value.
    ///
    /// Work is bounded: at most `SETTLE_HORIZON_MS / MAX_SUBSTEP_MS` substeps per call.
    pub fn step(&mut self, dt_ms: f64) -> f64 {
        if !dt_ms.is_finite() || dt_ms <= 0.0 || self.is_at_rest() {
            return self.value;
        }
        if dt_ms > SETTLE_HORIZON_MS {
            self.jump(self.target);
            return self.value;
        }

        let steps = (dt_ms / MAX_SUBSTEP_MS).ceil().max(1.0) as u64;
        let h = dt_ms / steps as f64 / 1000.0;
        let SpringConfig {
            stiffness: k,
            damping: c,
            mass: m,
            ..
        } = self.config;

        for _ in 0..steps {
            let accel = (-k * (self.value - self.target) - c * self.velocity) / m;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }

        if self.velocity.abs() < self.config.rest_speed
            && (self.value - self.target).abs() < self.config.rest_delta
        {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
