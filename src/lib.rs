//! Scuderia is a headless motion engine for a scroll-driven, racing-themed portfolio page.
//!
//! It owns the page's behaviour and none of its markup. A host feeds it scroll, resize, click and
//! frame events and paints the values it returns:
//!
//! - Load and validate a [`Profile`]
//! - Create a [`MotionSession`]
//! - Call [`MotionSession::frame`] once per display frame, or replay a [`Script`] into a
//!   [`FrameSink`]
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod animation;
pub(crate) mod contact;
pub(crate) mod dashboard;
pub(crate) mod encode;
pub(crate) mod graph;
pub(crate) mod launch;
pub(crate) mod profile;
pub(crate) mod scene;
pub(crate) mod scroll;
pub(crate) mod session;

pub use crate::foundation::core::{Fps, FrameIndex, Progress, Rect, Viewport};
pub use crate::foundation::error::{ScuderiaError, ScuderiaResult};
pub use crate::foundation::math::Rng64;

pub use crate::animation::cycle::IntervalCycle;
pub use crate::animation::ease::Ease;
pub use crate::animation::interp::{Lerp, RangeMap};
pub use crate::animation::spring::{Spring, SpringConfig};
pub use crate::animation::style::StyleValue;
pub use crate::animation::tween::{Repeat, Tween};
pub use crate::assets::store::{AssetManifest, PreparedAsset, PreparedAssets, normalize_rel_path};
pub use crate::contact::endpoint::{SimulatedEndpoint, SubmitEndpoint, SubmitError, Ticket};
pub use crate::contact::form::{ContactDraft, ContactForm, Field, SubmitStatus};
pub use crate::dashboard::gauge::{Gauge, GaugeReading, Speedometer};
pub use crate::encode::sink::{FrameSink, InMemorySink, JsonLinesSink, SinkConfig};
pub use crate::graph::dag::{GraphInputs, MotionGraph, NodeId};
pub use crate::launch::effects::{EffectScaling, EngineEffects};
pub use crate::launch::profile::{AccelCurve, LaunchProfile};
pub use crate::launch::sequence::{Kinematics, LaunchPhase, LaunchSequence};
pub use crate::launch::trail::{DustPuff, LaunchTrail, Streak, TrailFrame};
pub use crate::profile::model::{
    CarouselDef, ContactDef, DashboardDef, Presentation, Profile, PropertyDef, ScaleDef,
    SpeedometerDef, Theme, TrackDef,
};
pub use crate::scene::backdrop::{Axis, Backdrop, Particle, SceneConfig, SceneSummary, SpeedLine};
pub use crate::scene::cue::{ScrollCue, ScrollCueMotion};
pub use crate::scroll::source::{ScrollSource, TrackId};
pub use crate::scroll::track::{Edge, ScrollOffset, ScrollTrack};
pub use crate::session::motion_session::{FrameState, MotionSession};
pub use crate::session::script::{ContactKey, ResizeKey, ScrollKey, Script, SimulationStats};
