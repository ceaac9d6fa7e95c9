use std::io::Write;

use crate::foundation::core::{Fps, FrameIndex, Viewport};
use crate::foundation::error::{ScuderiaError, ScuderiaResult};
use crate::session::motion_session::FrameState;

/// Configuration provided to a [`FrameSink`] at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkConfig {
    /// Display refresh rate the frames were sampled at.
    pub fps: Fps,
    /// Viewport at the start of the run.
    pub viewport: Viewport,
    /// Number of frames that will be pushed.
    pub frames: u64,
}

/// Sink contract for consuming frame states in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ScuderiaResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameState) -> ScuderiaResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ScuderiaResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in timeline order.
    pub(crate) frames: Vec<(FrameIndex, FrameState)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameState)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ScuderiaResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameState) -> ScuderiaResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ScuderiaResult<()> {
        Ok(())
    }
}

/// Writes one JSON object per frame, newline separated.
///
/// Each line is `{"frame": <index>, ...FrameState}`.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    last: Option<FrameIndex>,
    written: u64,
}

#[derive(serde::Serialize)]
struct Line<'a> {
    frame: u64,
    #[serde(flatten)]
    state: &'a FrameState,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: None,
            written: 0,
        }
    }

    /// Lines written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, _cfg: SinkConfig) -> ScuderiaResult<()> {
        self.last = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameState) -> ScuderiaResult<()> {
        if self.last.is_some_and(|last| idx <= last) {
            return Err(ScuderiaError::state(format!(
                "frame {} pushed out of order",
                idx.0
            )));
        }
        let line = Line {
            frame: idx.0,
            state: frame,
        };
        serde_json::to_writer(&mut self.out, &line)
            .map_err(|e| ScuderiaError::serde(format!("encode frame {}: {e}", idx.0)))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| ScuderiaError::Other(anyhow::Error::new(e).context("write frame line")))?;
        self.last = Some(idx);
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> ScuderiaResult<()> {
        self.out
            .flush()
            .map_err(|e| ScuderiaError::Other(anyhow::Error::new(e).context("flush frame lines")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
