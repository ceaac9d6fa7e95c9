use glam::DVec3;

use crate::foundation::error::{ScuderiaError, ScuderiaResult};
use crate::foundation::math::{Rng64, derive_seed};

/// World axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
    /// Depth.
    #[default]
    Z,
}

impl Axis {
    fn unit(self) -> DVec3 {
        match self {
            Self::X => DVec3::X,
            Self::Y => DVec3::Y,
            Self::Z => DVec3::Z,
        }
    }
}

/// Decorative background scene settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Number of floating speed-line meshes.
    pub speed_lines: usize,
    /// Number of drifting particles.
    pub particles: usize,
    /// Scene bounds are `[-half_extent, half_extent]` on every axis.
    pub half_extent: f64,
    /// Axis particles drift along (and wrap on).
    pub drift_axis: Axis,
    /// Base particle drift speed in units per second.
    pub drift_speed: f64,
    /// How often the sphere's emissive intensity is resampled.
    pub pulse_interval_ms: f64,
    /// Lower bound of the emissive distribution.
    pub emissive_min: f64,
    /// Upper bound of the emissive distribution.
    pub emissive_max: f64,
    /// How strongly engine intensity speeds up particles and brightens the sphere; 0 disables.
    pub intensity_coupling: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            speed_lines: 20,
            particles: 40,
            half_extent: 10.0,
            drift_axis: Axis::Z,
            drift_speed: 2.0,
            pulse_interval_ms: 500.0,
            emissive_min: 0.5,
            emissive_max: 1.5,
            intensity_coupling: 1.0,
        }
    }
}

impl SceneConfig {
    /// Validate ranges.
    pub fn validate(&self) -> ScuderiaResult<()> {
        if !(self.half_extent.is_finite() && self.half_extent > 0.0) {
            return Err(ScuderiaError::validation("scene half_extent must be finite and > 0"));
        }
        if !(self.pulse_interval_ms.is_finite() && self.pulse_interval_ms > 0.0) {
            return Err(ScuderiaError::validation(
                "scene pulse_interval_ms must be finite and > 0",
            ));
        }
        if !self.drift_speed.is_finite() {
            return Err(ScuderiaError::validation("scene drift_speed must be finite"));
        }
        if !(self.emissive_min.is_finite()
            && self.emissive_max.is_finite()
            && self.emissive_min <= self.emissive_max)
        {
            return Err(ScuderiaError::validation(
                "scene emissive range must be finite with min <= max",
            ));
        }
        if !(self.intensity_coupling.is_finite() && self.intensity_coupling >= 0.0) {
            return Err(ScuderiaError::validation(
                "scene intensity_coupling must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// A spinning, bobbing speed-line mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedLine {
    /// Rest position.
    pub base: DVec3,
    /// Current position: `base` plus a vertical float of at most 0.5 units.
    pub position: DVec3,
    /// Current orientation (Euler radians).
    pub rotation: DVec3,
    /// Angular velocity (radians per second).
    pub spin: DVec3,
    float_speed: f64,
    float_phase: f64,
}

impl SpeedLine {
    /// Position including the vertical float offset at `t_s`.
    pub fn position_at(&self, t_s: f64) -> DVec3 {
        self.base + DVec3::Y * (t_s * self.float_speed + self.float_phase).sin() * 0.5
    }
}

/// A drifting particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Current position; always inside the scene bounds.
    pub position: DVec3,
    speed_factor: f64,
}

/// Summary of the scene for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct SceneSummary {
    /// Hero mesh wobble `(x, y)` in radians.
    pub hero_rotation: [f64; 2],
    /// Sphere emissive intensity after engine coupling.
    pub sphere_emissive: f64,
    /// Number of speed-line meshes.
    pub speed_lines: usize,
    /// Number of particles.
    pub particles: usize,
}

/// Perpetual decorative simulation behind the hero.
///
/// Deterministic for a given seed and sequence of `advance` timestamps. Reads engine intensity
/// but never writes application state.
#[derive(Clone, Debug)]
pub struct Backdrop {
    config: SceneConfig,
    speed_lines: Vec<SpeedLine>,
    particles: Vec<Particle>,
    pulse_rng: Rng64,
    emissive: f64,
    next_pulse_ms: f64,
    hero_rotation: [f64; 2],
    last_ms: Option<f64>,
    intensity: f64,
}

impl Backdrop {
    /// Populate the scene from `seed`.
    pub fn new(config: SceneConfig, seed: u64) -> ScuderiaResult<Self> {
        config.validate()?;
        let e = config.half_extent;

        let speed_lines = (0..config.speed_lines)
            .map(|i| {
                let mut rng = Rng64::new(derive_seed(seed, "speed_line", i as u64));
                let base = DVec3::new(rng.range(-e, e), rng.range(-e, e), rng.range(-e, e));
                let mut line = SpeedLine {
                    base,
                    position: base,
                    rotation: DVec3::ZERO,
                    spin: DVec3::new(rng.range(0.1, 0.5), rng.range(0.1, 0.5), 0.0),
                    float_speed: rng.range(0.5, 2.5),
                    float_phase: rng.range(0.0, std::f64::consts::TAU),
                };
                line.position = line.position_at(0.0);
                line
            })
            .collect();

        let particles = (0..config.particles)
            .map(|i| {
                let mut rng = Rng64::new(derive_seed(seed, "particle", i as u64));
                Particle {
                    position: DVec3::new(rng.range(-e, e), rng.range(-e, e), rng.range(-e, e)),
                    speed_factor: rng.range(0.5, 1.5),
                }
            })
            .collect();

        let mut pulse_rng = Rng64::new(derive_seed(seed, "pulse", 0));
        let emissive = pulse_rng.range(config.emissive_min, config.emissive_max);

        Ok(Self {
            config,
            speed_lines,
            particles,
            pulse_rng,
            emissive,
            next_pulse_ms: config.pulse_interval_ms,
            hero_rotation: [0.0, 0.0],
            last_ms: None,
            intensity: 0.0,
        })
    }

    /// Advance to `now_ms`, reading the current engine intensity.
    pub fn advance(&mut self, now_ms: f64, engine_intensity: f64) {
        if !now_ms.is_finite() {
            return;
        }
        let dt_s = self
            .last_ms
            .map_or(0.0, |last| ((now_ms - last) / 1000.0).max(0.0));
        self.last_ms = Some(now_ms);
        self.intensity = engine_intensity.clamp(0.0, 1.0);
        let boost = 1.0 + self.config.intensity_coupling * self.intensity;
        let t_s = now_ms / 1000.0;

        self.hero_rotation = [(t_s * 0.3).sin() * 0.2, t_s * 0.6];

        for line in &mut self.speed_lines {
            line.rotation += line.spin * dt_s;
            line.position = line.position_at(t_s);
        }

        let e = self.config.half_extent;
        let axis = self.config.drift_axis.unit();
        for p in &mut self.particles {
            p.position += axis * (self.config.drift_speed * p.speed_factor * boost * dt_s);
            p.position = wrap(p.position, axis, e);
        }

        if now_ms >= self.next_pulse_ms {
            self.emissive = self
                .pulse_rng
                .range(self.config.emissive_min, self.config.emissive_max);
            let missed = ((now_ms - self.next_pulse_ms) / self.config.pulse_interval_ms).floor();
            self.next_pulse_ms += (missed + 1.0) * self.config.pulse_interval_ms;
        }
    }

    /// Speed-line meshes.
    pub fn speed_lines(&self) -> &[SpeedLine] {
        &self.speed_lines
    }

    /// Particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Raw sphere emissive intensity, before engine coupling.
    pub fn emissive(&self) -> f64 {
        self.emissive
    }

    /// Frame summary.
    pub fn summary(&self) -> SceneSummary {
        SceneSummary {
            hero_rotation: self.hero_rotation,
            sphere_emissive: self.emissive
                * (1.0 + self.config.intensity_coupling * self.intensity),
            speed_lines: self.speed_lines.len(),
            particles: self.particles.len(),
        }
    }
}

/// Wrap the `axis` component of `p` back into `[-e, e)`.
fn wrap(p: DVec3, axis: DVec3, e: f64) -> DVec3 {
    let along = p.dot(axis);
    let wrapped = (along + e).rem_euclid(2.0 * e) - e;
    p + axis * (wrapped - along)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/backdrop.rs"]
mod tests;
