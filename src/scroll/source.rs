use crate::foundation::core::{Progress, Viewport};
use crate::foundation::error::{ScuderiaError, ScuderiaResult};
use crate::scroll::track::ScrollTrack;

/// Dense index of a registered track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub(crate) u32);

/// Coalesces raw scroll/resize observations into one progress sample per display frame.
///
/// Only the most recent observation is kept; intermediate scroll events between two frames are
/// dropped.
#[derive(Clone, Debug)]
pub struct ScrollSource {
    names: Vec<String>,
    tracks: Vec<ScrollTrack>,
    scroll_y: f64,
    viewport: Viewport,
    document_height: f64,
    dirty: bool,
    progress: Vec<Progress>,
}

impl ScrollSource {
    /// Built-in whole-document track name.
    pub const PAGE: &'static str = "page";

    /// Create a source with the implicit [`ScrollSource::PAGE`] track registered as id 0.
    pub fn new(viewport: Viewport, document_height: f64) -> ScuderiaResult<Self> {
        viewport.validate()?;
        if !(document_height.is_finite() && document_height >= 0.0) {
            return Err(ScuderiaError::validation(
                "document height must be finite and >= 0",
            ));
        }
        Ok(Self {
            names: vec![Self::PAGE.to_owned()],
            tracks: vec![ScrollTrack::page()],
            scroll_y: 0.0,
            viewport,
            document_height,
            dirty: true,
            progress: vec![Progress::ZERO],
        })
    }

    /// Register a named track.
    pub fn add_track(&mut self, name: impl Into<String>, track: ScrollTrack) -> ScuderiaResult<TrackId> {
        let name = name.into();
        if self.names.iter().any(|n| *n == name) {
            return Err(ScuderiaError::validation(format!(
                "scroll track '{name}' is already registered"
            )));
        }
        let id = TrackId(self.tracks.len() as u32);
        self.names.push(name);
        self.tracks.push(track);
        self.progress.push(Progress::ZERO);
        self.dirty = true;
        Ok(id)
    }

    /// Look up a track by name.
    pub fn track_id(&self, name: &str) -> Option<TrackId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| TrackId(i as u32))
    }

    /// Track names in id order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Record a scroll event.
    pub fn observe_scroll(&mut self, scroll_y: f64) {
        if scroll_y.is_finite() {
            self.scroll_y = scroll_y;
            self.dirty = true;
        }
    }

    /// Record a resize event; invalid sizes are ignored.
    pub fn observe_resize(&mut self, viewport: Viewport, document_height: f64) {
        if viewport.validate().is_err() || !(document_height.is_finite() && document_height >= 0.0)
        {
            tracing::debug!(?viewport, document_height, "ignoring invalid resize");
            return;
        }
        self.viewport = viewport;
        self.document_height = document_height;
        self.dirty = true;
    }

    /// Latest observed scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Latest observed viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Called once per display frame; recomputes progress only if something was observed.
    pub fn sample_frame(&mut self) -> &[Progress] {
        if self.dirty {
            for (p, track) in self.progress.iter_mut().zip(self.tracks.iter()) {
                *p = track.progress(self.scroll_y, self.viewport, self.document_height);
            }
            self.dirty = false;
        }
        &self.progress
    }

    /// Progress of every track as of the last [`ScrollSource::sample_frame`], indexed by id.
    pub fn sampled(&self) -> &[Progress] {
        &self.progress
    }

    /// Progress of `id` as of the last [`ScrollSource::sample_frame`].
    pub fn progress(&self, id: TrackId) -> Progress {
        self.progress
            .get(id.0 as usize)
            .copied()
            .unwrap_or(Progress::ZERO)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/source.rs"]
mod tests;
