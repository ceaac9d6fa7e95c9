use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::contact::form::{ContactDraft, Field};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Viewport};
use crate::foundation::error::{ScuderiaError, ScuderiaResult};
use crate::session::motion_session::MotionSession;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrollKey {
    pub at_ms: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResizeKey {
    pub at_ms: f64,
    pub viewport: Viewport,
    pub document_height: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactKey {
    pub at_ms: f64,
    pub draft: ContactDraft,
}

/// Timed host events replayed against a session.
///
/// Every event list must be sorted by time. Events fire on the first frame at or after their
/// timestamp, in list order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub duration_ms: f64,
    #[serde(default)]
    pub scroll: Vec<ScrollKey>,
    #[serde(default)]
    pub resize: Vec<ResizeKey>,
    /// "Start engine" presses.
    #[serde(default)]
    pub launches: Vec<f64>,
    #[serde(default)]
    pub contact: Vec<ContactKey>,
    /// Tear the page down at this time.
    #[serde(default)]
    pub dispose_at_ms: Option<f64>,
}

impl Script {
    pub fn from_reader<R: std::io::Read>(r: R) -> ScuderiaResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScuderiaError::serde(format!("parse script JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ScuderiaResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScuderiaError::validation(format!("open script JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> ScuderiaResult<()> {
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(ScuderiaError::validation(
                "script duration_ms must be finite and > 0",
            ));
        }
        sorted("scroll", self.scroll.iter().map(|k| k.at_ms))?;
        sorted("resize", self.resize.iter().map(|k| k.at_ms))?;
        sorted("launches", self.launches.iter().copied())?;
        sorted("contact", self.contact.iter().map(|k| k.at_ms))?;
        if let Some(t) = self.dispose_at_ms
            && !t.is_finite()
        {
            return Err(ScuderiaError::validation("script dispose_at_ms must be finite"));
        }
        Ok(())
    }
}

fn sorted(what: &str, times: impl Iterator<Item = f64>) -> ScuderiaResult<()> {
    let mut prev = f64::NEG_INFINITY;
    for t in times {
        if !t.is_finite() {
            return Err(ScuderiaError::validation(format!(
                "script {what} times must be finite"
            )));
        }
        if t < prev {
            return Err(ScuderiaError::validation(format!(
                "script {what} times must be sorted"
            )));
        }
        prev = t;
    }
    Ok(())
}

/// Counters from one [`MotionSession::simulate`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SimulationStats {
    pub frames: u64,
    pub launches_started: u64,
    /// Presses refused because a run or cooldown was in progress.
    pub launches_rejected: u64,
    pub submissions_started: u64,
    /// Submissions refused by validation or because one was in flight.
    pub submissions_rejected: u64,
}

impl MotionSession {
    /// Replay `script` at the session frame rate, pushing one frame per display frame.
    ///
    /// Refused user actions are counted, not returned as errors.
    #[tracing::instrument(skip_all, fields(duration_ms = script.duration_ms))]
    pub fn simulate<S: FrameSink + ?Sized>(
        &mut self,
        script: &Script,
        sink: &mut S,
    ) -> ScuderiaResult<SimulationStats> {
        script.validate()?;
        let fps = self.fps();
        let frames = fps.frames_covering_ms(script.duration_ms);
        sink.begin(SinkConfig {
            fps,
            viewport: self.scroll().viewport(),
            frames,
        })?;

        let mut stats = SimulationStats::default();
        let (mut si, mut ri, mut li, mut ci) = (0, 0, 0, 0);
        let mut disposed = false;
        for i in 0..frames {
            let idx = FrameIndex(i);
            let now = fps.frame_to_ms(idx);

            while let Some(k) = script.resize.get(ri).filter(|k| k.at_ms <= now) {
                self.observe_resize(k.viewport, k.document_height);
                ri += 1;
            }
            while let Some(k) = script.scroll.get(si).filter(|k| k.at_ms <= now) {
                self.observe_scroll(k.y);
                si += 1;
            }
            while let Some(t) = script.launches.get(li).filter(|t| **t <= now) {
                match self.press_start(*t) {
                    Ok(()) => stats.launches_started += 1,
                    Err(ScuderiaError::State(msg)) => {
                        tracing::debug!(at_ms = *t, %msg, "launch press refused");
                        stats.launches_rejected += 1;
                    }
                    Err(e) => return Err(e),
                }
                li += 1;
            }
            while let Some(k) = script.contact.get(ci).filter(|k| k.at_ms <= now) {
                for f in Field::ALL {
                    self.set_contact_field(f, k.draft.field(f));
                }
                match self.submit_contact(k.at_ms) {
                    Ok(()) if self.contact().is_submitting() => stats.submissions_started += 1,
                    Ok(()) => {}
                    Err(ScuderiaError::State(msg) | ScuderiaError::Validation(msg)) => {
                        tracing::debug!(at_ms = k.at_ms, %msg, "contact submission refused");
                        stats.submissions_rejected += 1;
                    }
                    Err(e) => return Err(e),
                }
                ci += 1;
            }
            if !disposed && script.dispose_at_ms.is_some_and(|t| t <= now) {
                self.dispose();
                disposed = true;
            }

            let state = self.frame(now);
            sink.push_frame(idx, &state)?;
            stats.frames += 1;
        }

        sink.end()?;
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/script.rs"]
mod tests;
