use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{Progress, Rect, Viewport};
use crate::foundation::error::ScuderiaError;

/// A point along an element (or the viewport), as a fraction of its height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    /// Top edge (`0`).
    Start,
    /// Middle (`0.5`).
    Center,
    /// Bottom edge (`1`).
    End,
    /// Arbitrary fraction of the height.
    Fraction(f64),
}

impl Edge {
    /// Position of this edge as a fraction of the box height.
    pub fn fraction(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
            Self::Fraction(f) => f,
        }
    }
}

impl FromStr for Edge {
    type Err = ScuderiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Self::Fraction)
                .ok_or_else(|| ScuderiaError::validation(format!("unknown scroll edge '{other}'"))),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Center => f.write_str("center"),
            Self::End => f.write_str("end"),
            Self::Fraction(v) => write!(f, "{v}"),
        }
    }
}

/// Intersection of a target edge with a viewport edge, written `"<target> <viewport>"`.
///
/// `"start end"` is reached when the target's top meets the viewport's bottom.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScrollOffset {
    /// Edge on the tracked element.
    pub target: Edge,
    /// Edge on the viewport.
    pub container: Edge,
}

impl ScrollOffset {
    /// `"start start"`.
    pub const START_START: Self = Self {
        target: Edge::Start,
        container: Edge::Start,
    };
    /// `"end end"`.
    pub const END_END: Self = Self {
        target: Edge::End,
        container: Edge::End,
    };
    /// `"start end"`.
    pub const START_END: Self = Self {
        target: Edge::Start,
        container: Edge::End,
    };
    /// `"end start"`.
    pub const END_START: Self = Self {
        target: Edge::End,
        container: Edge::Start,
    };
}

impl FromStr for ScrollOffset {
    type Err = ScuderiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(target), Some(container), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ScuderiaError::validation(format!(
                "scroll offset '{s}' must be two edges, e.g. \"start end\""
            )));
        };
        Ok(Self {
            target: target.parse()?,
            container: container.parse()?,
        })
    }
}

impl TryFrom<String> for ScrollOffset {
    type Error = ScuderiaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ScrollOffset> for String {
    fn from(o: ScrollOffset) -> Self {
        format!("{} {}", o.target, o.container)
    }
}

/// Maps document scroll position to progress through a tracked element.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTrack {
    /// Element box in document coordinates; `None` tracks the whole document.
    pub target: Option<Rect>,
    /// Offsets at which progress is 0 and 1.
    pub offsets: [ScrollOffset; 2],
}

impl Default for ScrollTrack {
    fn default() -> Self {
        Self::page()
    }
}

impl ScrollTrack {
    /// Whole-document progress: `scroll_y / (document_height - viewport_height)`.
    pub fn page() -> Self {
        Self {
            target: None,
            offsets: [ScrollOffset::START_START, ScrollOffset::END_END],
        }
    }

    /// Track `target` between the given offsets.
    pub fn element(target: Rect, offsets: [ScrollOffset; 2]) -> Self {
        Self {
            target: Some(target),
            offsets,
        }
    }

    /// Scroll positions at which progress is 0 and 1.
    pub fn span(&self, viewport: Viewport, document_height: f64) -> (f64, f64) {
        let (top, height) = match self.target {
            Some(r) => (r.y0.min(r.y1), r.height().abs()),
            None => (0.0, document_height.max(0.0)),
        };
        let at = |o: ScrollOffset| {
            top + o.target.fraction() * height - o.container.fraction() * viewport.height
        };
        (at(self.offsets[0]), at(self.offsets[1]))
    }

    /// Progress at `scroll_y`, clamped to `[0, 1]`.
    pub fn progress(&self, scroll_y: f64, viewport: Viewport, document_height: f64) -> Progress {
        let y = if scroll_y.is_nan() { 0.0 } else { scroll_y };
        let (start, end) = self.span(viewport, document_height);
        if end <= start {
            return if y >= start {
                Progress::ONE
            } else {
                Progress::ZERO
            };
        }
        Progress::new((y - start) / (end - start))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/track.rs"]
mod tests;
