use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::cycle::IntervalCycle;
use crate::animation::ease::Ease;
use crate::animation::interp::RangeMap;
use crate::animation::spring::SpringConfig;
use crate::animation::style::StyleValue;
use crate::assets::store::AssetManifest;
use crate::contact::endpoint::SimulatedEndpoint;
use crate::dashboard::gauge::{Gauge, Speedometer};
use crate::foundation::core::{Fps, Rect, Viewport};
use crate::foundation::error::{ScuderiaError, ScuderiaResult};
use crate::launch::profile::LaunchProfile;
use crate::scene::backdrop::SceneConfig;
use crate::scroll::source::ScrollSource;
use crate::scroll::track::{ScrollOffset, ScrollTrack};

/// Color scheme, fixed for the lifetime of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Presentation {
    pub theme: Theme,
}

/// A named scroll track. Without `target` the whole document is tracked.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackDef {
    #[serde(default)]
    pub target: Option<Rect>,
    #[serde(default = "default_offsets")]
    pub offset: [ScrollOffset; 2],
}

fn default_offsets() -> [ScrollOffset; 2] {
    [ScrollOffset::START_START, ScrollOffset::END_END]
}

impl TrackDef {
    pub fn track(&self) -> ScrollTrack {
        match self.target {
            Some(r) => ScrollTrack::element(r, self.offset),
            None => ScrollTrack {
                target: None,
                offsets: self.offset,
            },
        }
    }
}

/// Affine transform `x * factor + offset`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleDef {
    pub factor: f64,
    #[serde(default)]
    pub offset: f64,
}

/// One derived presentation property.
///
/// The source is a scroll track (page progress when `track` is absent) or, with `clock`, the
/// milliseconds since the session started. `scale` is applied to the raw source before the
/// breakpoint map, `spring` smooths the mapped value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyDef {
    pub name: String,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub clock: bool,
    #[serde(default)]
    pub scale: Option<ScaleDef>,
    pub input: Vec<f64>,
    pub output: Vec<StyleValue>,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub spring: Option<SpringConfig>,
}

impl PropertyDef {
    pub fn range_map(&self) -> ScuderiaResult<RangeMap<StyleValue>> {
        Ok(RangeMap::new(self.input.clone(), self.output.clone())?.with_ease(self.ease))
    }

    /// Track this property reads, if it is scroll-driven.
    pub fn track_name(&self) -> Option<&str> {
        if self.clock {
            None
        } else {
            Some(self.track.as_deref().unwrap_or(ScrollSource::PAGE))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeedometerDef {
    pub value: f64,
    pub max: f64,
}

/// Gauges and dials animated from session start.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardDef {
    /// Gauge levels in percent, in display order.
    pub gauges: Vec<f64>,
    pub speedometers: Vec<SpeedometerDef>,
}

impl DashboardDef {
    pub fn build(&self) -> ScuderiaResult<(Vec<Gauge>, Vec<Speedometer>)> {
        let gauges = self
            .gauges
            .iter()
            .enumerate()
            .map(|(i, level)| Gauge::new(*level, i))
            .collect::<ScuderiaResult<Vec<_>>>()?;
        let dials = self
            .speedometers
            .iter()
            .map(|d| Speedometer::new(d.value, d.max))
            .collect::<ScuderiaResult<Vec<_>>>()?;
        Ok((gauges, dials))
    }
}

/// Rotating highlight over `len` items.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarouselDef {
    pub period_ms: f64,
    pub len: usize,
}

impl CarouselDef {
    pub fn build(&self) -> ScuderiaResult<IntervalCycle> {
        IntervalCycle::new(self.period_ms, self.len)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactDef {
    pub submit_delay_ms: f64,
}

impl Default for ContactDef {
    fn default() -> Self {
        Self {
            submit_delay_ms: SimulatedEndpoint::DEFAULT_DELAY_MS,
        }
    }
}

/// Session configuration document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default)]
    pub fps: Fps,
    #[serde(default)]
    pub presentation: Presentation,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default = "default_document_height")]
    pub document_height: f64,
    pub tracks: BTreeMap<String, TrackDef>,
    pub properties: Vec<PropertyDef>,
    #[serde(default)]
    pub launch: LaunchProfile,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub assets: AssetManifest,
    #[serde(default)]
    pub contact: ContactDef,
    #[serde(default)]
    pub dashboard: DashboardDef,
    #[serde(default)]
    pub carousel: Option<CarouselDef>,
    #[serde(default)]
    pub seed: u64,
}

fn default_document_height() -> f64 {
    4000.0
}

impl Profile {
    /// Parse a profile from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScuderiaResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScuderiaError::serde(format!("parse profile JSON: {e}")))
    }

    /// Parse a profile from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScuderiaResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScuderiaError::validation(format!("open profile JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every section. A profile that validates builds a session.
    pub fn validate(&self) -> ScuderiaResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        self.viewport.validate()?;
        if !(self.document_height.is_finite() && self.document_height >= 0.0) {
            return Err(ScuderiaError::validation(
                "document_height must be finite and >= 0",
            ));
        }

        for (name, def) in &self.tracks {
            if name == ScrollSource::PAGE {
                return Err(ScuderiaError::validation(format!(
                    "track name '{name}' is reserved"
                )));
            }
            if let Some(r) = def.target
                && !(r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite())
            {
                return Err(ScuderiaError::validation(format!(
                    "track '{name}' target must be finite"
                )));
            }
        }

        let mut seen = Vec::<&str>::with_capacity(self.properties.len());
        for p in &self.properties {
            if p.name.is_empty() {
                return Err(ScuderiaError::validation("property name must be non-empty"));
            }
            if seen.contains(&p.name.as_str()) {
                return Err(ScuderiaError::validation(format!(
                    "property '{}' is declared twice",
                    p.name
                )));
            }
            seen.push(&p.name);

            if p.clock && p.track.is_some() {
                return Err(ScuderiaError::validation(format!(
                    "property '{}' sets both clock and track",
                    p.name
                )));
            }
            if let Some(track) = p.track_name()
                && track != ScrollSource::PAGE
                && !self.tracks.contains_key(track)
            {
                return Err(ScuderiaError::validation(format!(
                    "property '{}' reads unknown track '{track}'",
                    p.name
                )));
            }
            if let Some(s) = p.scale
                && !(s.factor.is_finite() && s.offset.is_finite())
            {
                return Err(ScuderiaError::validation(format!(
                    "property '{}' scale must be finite",
                    p.name
                )));
            }
            p.range_map().map_err(|e| {
                ScuderiaError::validation(format!("property '{}': {e}", p.name))
            })?;
            if let Some(spring) = &p.spring {
                spring.validate()?;
            }
        }

        self.launch.validate()?;
        self.scene.validate()?;
        SimulatedEndpoint::new(self.contact.submit_delay_ms)?;
        self.dashboard.build()?;
        if let Some(c) = &self.carousel {
            c.build()?;
        }
        Ok(())
    }

    /// The portfolio page: hero parallax, dashboard reveal and the projects track.
    pub fn site_default() -> ScuderiaResult<Self> {
        let num = StyleValue::number;
        let scroll_prop =
            |name: &str, track: Option<&str>, input: Vec<f64>, output: Vec<StyleValue>| {
                PropertyDef {
                    name: name.to_owned(),
                    track: track.map(str::to_owned),
                    clock: false,
                    scale: None,
                    input,
                    output,
                    ease: Ease::Linear,
                    spring: None,
                }
            };
        let properties = vec![
            scroll_prop(
                "hero.y",
                None,
                vec![0.0, 1.0],
                vec![StyleValue::parse("0%")?, StyleValue::parse("50%")?],
            ),
            scroll_prop("dashboard.opacity", None, vec![0.1, 0.3], vec![num(0.0), num(1.0)]),
            scroll_prop("dashboard.scale", None, vec![0.1, 0.3], vec![num(0.8), num(1.0)]),
            scroll_prop(
                "projects.opacity",
                Some("projects"),
                vec![0.0, 0.2, 0.8, 1.0],
                vec![num(0.0), num(1.0), num(1.0), num(0.0)],
            ),
            scroll_prop(
                "projects.scale",
                Some("projects"),
                vec![0.0, 0.2, 0.8, 1.0],
                vec![num(0.8), num(1.0), num(1.0), num(0.8)],
            ),
        ];

        let mut tracks = BTreeMap::new();
        tracks.insert(
            "projects".to_owned(),
            TrackDef {
                target: Some(Rect::new(0.0, 2000.0, 1280.0, 3000.0)),
                offset: [ScrollOffset::START_END, ScrollOffset::END_START],
            },
        );

        Ok(Self {
            fps: Fps::default(),
            presentation: Presentation::default(),
            viewport: Viewport::default(),
            document_height: default_document_height(),
            tracks,
            properties,
            launch: LaunchProfile::default(),
            scene: SceneConfig::default(),
            assets: AssetManifest::default(),
            contact: ContactDef::default(),
            dashboard: DashboardDef {
                gauges: vec![95.0, 92.0, 88.0, 85.0, 80.0, 75.0],
                speedometers: vec![
                    SpeedometerDef {
                        value: 95.0,
                        max: 100.0,
                    },
                    SpeedometerDef {
                        value: 88.0,
                        max: 100.0,
                    },
                ],
            },
            carousel: Some(CarouselDef {
                period_ms: 3000.0,
                len: 4,
            }),
            seed: 0,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/profile/model.rs"]
mod tests;
