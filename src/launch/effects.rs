use crate::foundation::error::{ScuderiaError, ScuderiaResult};
use crate::launch::sequence::Kinematics;

/// Gains mapping engine intensity onto decorative signals.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectScaling {
    /// Glow opacity at rest.
    pub glow_base: f64,
    /// Extra glow opacity at full intensity.
    pub glow_gain: f64,
    /// Extra glow scale at full intensity.
    pub glow_scale_gain: f64,
    /// Extra exhaust/smoke scale at full intensity.
    pub exhaust_gain: f64,
    /// Speed-line height at rest, in pixels.
    pub speed_line_base_px: f64,
    /// Extra speed-line height at full intensity, in pixels.
    pub speed_line_gain_px: f64,
}

impl Default for EffectScaling {
    fn default() -> Self {
        Self {
            glow_base: 0.3,
            glow_gain: 0.7,
            glow_scale_gain: 0.2,
            exhaust_gain: 1.5,
            speed_line_base_px: 8.0,
            speed_line_gain_px: 20.0,
        }
    }
}

impl EffectScaling {
    /// All gains must be finite and non-negative.
    pub fn validate(&self) -> ScuderiaResult<()> {
        let ok = [
            self.glow_base,
            self.glow_gain,
            self.glow_scale_gain,
            self.exhaust_gain,
            self.speed_line_base_px,
            self.speed_line_gain_px,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0);
        if ok {
            Ok(())
        } else {
            Err(ScuderiaError::validation(
                "effect scaling gains must be finite and >= 0",
            ))
        }
    }
}

/// Cosmetic signals derived from the launch state for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct EngineEffects {
    /// Speed lines and road dust are shown only while rolling.
    pub rolling: bool,
    /// Headlight/underglow opacity in `[0, 1]`.
    pub glow_opacity: f64,
    /// Glow scale factor (`>= 1`).
    pub glow_scale: f64,
    /// Exhaust plume scale factor (`>= 1`).
    pub exhaust_scale: f64,
    /// Height of each speed line in pixels.
    pub speed_line_height_px: f64,
}

impl EngineEffects {
    /// Derive effects from the current kinematics.
    pub fn derive(kin: &Kinematics, rolling: bool, scaling: &EffectScaling) -> Self {
        let i = kin.engine_intensity.clamp(0.0, 1.0);
        Self {
            rolling,
            glow_opacity: (scaling.glow_base + scaling.glow_gain * i).min(1.0),
            glow_scale: 1.0 + scaling.glow_scale_gain * i,
            exhaust_scale: 1.0 + scaling.exhaust_gain * i,
            speed_line_height_px: scaling.speed_line_base_px + scaling.speed_line_gain_px * i,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/launch/effects.rs"]
mod tests;
