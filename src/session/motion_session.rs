use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::animation::cycle::IntervalCycle;
use crate::animation::style::StyleValue;
use crate::assets::store::PreparedAssets;
use crate::contact::endpoint::{SimulatedEndpoint, SubmitEndpoint};
use crate::contact::form::{ContactForm, Field, SubmitStatus};
use crate::dashboard::gauge::{Gauge, GaugeReading, Speedometer};
use crate::foundation::core::{Fps, Viewport};
use crate::foundation::error::{ScuderiaError, ScuderiaResult};
use crate::graph::dag::{GraphInputs, MotionGraph, NodeId};
use crate::launch::effects::EngineEffects;
use crate::launch::sequence::{Kinematics, LaunchPhase, LaunchSequence};
use crate::launch::trail::{LaunchTrail, TrailFrame};
use crate::profile::model::{Profile, Theme};
use crate::scene::backdrop::{Backdrop, SceneSummary};
use crate::scene::cue::{ScrollCue, ScrollCueMotion};
use crate::scroll::source::ScrollSource;

/// Everything a host needs to paint one display frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameState {
    /// Frame timestamp in host time.
    pub time_ms: f64,
    pub theme: Theme,
    /// Progress of every scroll track by name.
    pub progress: BTreeMap<String, f64>,
    /// Derived properties by name.
    pub properties: BTreeMap<String, StyleValue>,
    pub launch: LaunchPhase,
    pub kinematics: Kinematics,
    /// Whether the "start engine" control is shown.
    pub start_visible: bool,
    pub effects: EngineEffects,
    /// Speed lines and road dust; empty unless the car is rolling.
    pub trail: TrailFrame,
    pub scene: SceneSummary,
    pub scroll_cue: ScrollCue,
    pub gauges: Vec<GaugeReading>,
    /// Speedometer needle angles in degrees.
    pub needles_deg: Vec<f64>,
    /// Highlighted carousel item.
    pub carousel: Option<usize>,
    pub contact: SubmitStatus,
    pub submitting: bool,
    /// Image layers that loaded.
    pub layers: Vec<&'static str>,
}

/// Per-page motion state driven by host events and one `frame` call per display frame.
///
/// Building a session front-loads validation, graph construction and asset probing. Afterwards
/// every method is infallible except the ones that model user actions that can be refused.
pub struct MotionSession {
    fps: Fps,
    theme: Theme,
    scroll: ScrollSource,
    graph: MotionGraph,
    launch: LaunchSequence,
    trail: LaunchTrail,
    backdrop: Backdrop,
    cue: ScrollCueMotion,
    assets: PreparedAssets,
    contact: ContactForm<Box<dyn SubmitEndpoint>>,
    gauges: Vec<Gauge>,
    dials: Vec<Speedometer>,
    carousel: Option<IntervalCycle>,
    origin_ms: Option<f64>,
    last_ms: Option<f64>,
}

impl MotionSession {
    /// Build a session for `profile`, resolving assets under `assets_root`.
    #[tracing::instrument(skip(profile, assets_root), fields(properties = profile.properties.len()))]
    pub fn new(profile: &Profile, assets_root: impl AsRef<Path>) -> ScuderiaResult<Self> {
        profile.validate()?;

        let mut scroll = ScrollSource::new(profile.viewport, profile.document_height)?;
        for (name, def) in &profile.tracks {
            scroll.add_track(name.clone(), def.track())?;
        }

        let mut graph = MotionGraph::new();
        let mut sources = HashMap::<&str, NodeId>::new();
        let mut clock = None;
        for prop in &profile.properties {
            let mut node = match prop.track_name() {
                Some(track) => match sources.get(track) {
                    Some(id) => *id,
                    None => {
                        let tid = scroll.track_id(track).ok_or_else(|| {
                            ScuderiaError::validation(format!("unknown track '{track}'"))
                        })?;
                        let id = graph.progress(tid);
                        sources.insert(track, id);
                        id
                    }
                },
                None => *clock.get_or_insert_with(|| graph.clock()),
            };
            if let Some(s) = prop.scale {
                node = graph.affine(node, s.factor, s.offset)?;
            }
            node = graph.map(node, prop.range_map()?)?;
            if let Some(cfg) = prop.spring {
                node = graph.spring(node, cfg)?;
            }
            graph.export(prop.name.clone(), node)?;
        }

        let (gauges, dials) = profile.dashboard.build()?;
        let carousel = profile.carousel.map(|c| c.build()).transpose()?;
        let endpoint: Box<dyn SubmitEndpoint> =
            Box::new(SimulatedEndpoint::new(profile.contact.submit_delay_ms)?);

        let session = Self {
            fps: profile.fps,
            theme: profile.presentation.theme,
            scroll,
            graph,
            launch: LaunchSequence::new(profile.launch)?,
            trail: LaunchTrail::site_default()?,
            backdrop: Backdrop::new(profile.scene, profile.seed)?,
            cue: ScrollCueMotion::site_default()?,
            assets: PreparedAssets::prepare(assets_root.as_ref(), &profile.assets)?,
            contact: ContactForm::new(endpoint),
            gauges,
            dials,
            carousel,
            origin_ms: None,
            last_ms: None,
        };
        tracing::debug!(
            nodes = session.graph.len(),
            layers = ?session.assets.layers(),
            "motion session ready"
        );
        Ok(session)
    }

    /// Replace the contact delivery endpoint. Any in-flight submission is cancelled.
    pub fn with_endpoint(mut self, endpoint: impl SubmitEndpoint + 'static) -> Self {
        self.contact.dispose();
        self.contact = ContactForm::new(Box::new(endpoint));
        self
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn scroll(&self) -> &ScrollSource {
        &self.scroll
    }

    pub fn launch(&self) -> &LaunchSequence {
        &self.launch
    }

    pub fn assets(&self) -> &PreparedAssets {
        &self.assets
    }

    pub fn contact(&self) -> &ContactForm<Box<dyn SubmitEndpoint>> {
        &self.contact
    }

    /// Record the latest scroll position; applied on the next frame.
    pub fn observe_scroll(&mut self, scroll_y: f64) {
        self.scroll.observe_scroll(scroll_y);
    }

    /// Record the latest viewport and document size; applied on the next frame.
    pub fn observe_resize(&mut self, viewport: Viewport, document_height: f64) {
        self.scroll.observe_resize(viewport, document_height);
    }

    /// "Start engine" click.
    pub fn press_start(&mut self, now_ms: f64) -> ScuderiaResult<()> {
        self.launch.start(now_ms)
    }

    pub fn set_contact_field(&mut self, field: Field, value: impl Into<String>) {
        self.contact.set_field(field, value);
    }

    pub fn submit_contact(&mut self, now_ms: f64) -> ScuderiaResult<()> {
        self.contact.submit(now_ms)
    }

    /// Tear down the page. Late contact completions are ignored from here on.
    pub fn dispose(&mut self) {
        self.contact.dispose();
    }

    /// Advance everything to `now_ms` and report what to paint.
    pub fn frame(&mut self, now_ms: f64) -> FrameState {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let clock_ms = (now_ms - origin).max(0.0);
        let dt_ms = self.last_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_ms = Some(now_ms);

        self.scroll.sample_frame();
        let sampled = self.scroll.sampled();
        self.graph.evaluate(&GraphInputs {
            progress: sampled,
            clock_ms,
            dt_ms,
        });
        let progress = self
            .scroll
            .names()
            .iter()
            .zip(sampled)
            .map(|(n, p)| (n.clone(), p.get()))
            .collect();
        let properties = self
            .graph
            .outputs()
            .map(|(n, v)| (n.to_owned(), v.clone()))
            .collect();

        let kinematics = self.launch.tick(now_ms);
        self.backdrop.advance(now_ms, kinematics.engine_intensity);
        self.contact.tick(now_ms);
        let trail = match self.launch.phase() {
            LaunchPhase::Running { started_at_ms } => self.trail.sample(now_ms - started_at_ms),
            LaunchPhase::Idle | LaunchPhase::Cooldown { .. } => TrailFrame::default(),
        };

        FrameState {
            time_ms: now_ms,
            theme: self.theme,
            progress,
            properties,
            launch: self.launch.phase(),
            kinematics,
            start_visible: self.launch.start_visible(),
            effects: self.launch.effects(),
            trail,
            scene: self.backdrop.summary(),
            scroll_cue: self.cue.sample(clock_ms),
            gauges: self.gauges.iter().map(|g| g.reading(clock_ms)).collect(),
            needles_deg: self.dials.iter().map(|d| d.needle_deg(clock_ms)).collect(),
            carousel: self.carousel.map(|c| c.index_at(clock_ms)),
            contact: self.contact.status().clone(),
            submitting: self.contact.is_submitting(),
            layers: self.assets.layers(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/motion_session.rs"]
mod tests;
