use crate::foundation::error::{ScuderiaError, ScuderiaResult};

/// Rotates through `len` items, advancing one item every `period_ms`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalCycle {
    period_ms: f64,
    len: usize,
}

impl IntervalCycle {
    /// Create a validated cycle.
    pub fn new(period_ms: f64, len: usize) -> ScuderiaResult<Self> {
        if len == 0 {
            return Err(ScuderiaError::animation("interval cycle needs at least one item"));
        }
        if !(period_ms.is_finite() && period_ms > 0.0) {
            return Err(ScuderiaError::animation(
                "interval cycle period must be finite and > 0",
            ));
        }
        Ok(Self { period_ms, len })
    }

    /// Active item index at `elapsed_ms` since mount.
    pub fn index_at(&self, elapsed_ms: f64) -> usize {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        let ticks = (elapsed_ms / self.period_ms).floor() as u64;
        (ticks % self.len as u64) as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/cycle.rs"]
mod tests;
