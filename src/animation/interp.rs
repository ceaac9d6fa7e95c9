use smallvec::SmallVec;

use crate::animation::ease::Ease;
use crate::animation::style::StyleValue;
use crate::foundation::error::{ScuderiaError, ScuderiaResult};

/// Interpolation contract for mappable value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;

    /// Whether `a` and `b` can be interpolated at all.
    fn compatible(_a: &Self, _b: &Self) -> bool {
        true
    }
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for StyleValue {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if !a.compatible(b) {
            // Unreachable through `RangeMap::new`; hold the segment start like a step.
            return if t < 1.0 { a.clone() } else { b.clone() };
        }
        StyleValue::lerp_slots(a, b, t)
    }

    fn compatible(a: &Self, b: &Self) -> bool {
        a.compatible(b)
    }
}

/// Piecewise-linear mapping from a source scalar to `T` over paired breakpoints.
///
/// Outside `[input[0], input[last]]` the result clamps to the nearest endpoint output.
#[derive(Clone, Debug)]
pub struct RangeMap<T> {
    input: SmallVec<[f64; 4]>,
    output: SmallVec<[T; 4]>,
    ease: Ease,
}

impl<T> RangeMap<T>
where
    T: Lerp + Clone,
{
    /// Build a validated map.
    ///
    /// `input` must be non-empty, finite and non-decreasing; `output` must have the same length
    /// and contain mutually interpolable values.
    pub fn new(input: Vec<f64>, output: Vec<T>) -> ScuderiaResult<Self> {
        if input.is_empty() {
            return Err(ScuderiaError::animation(
                "range map needs at least one breakpoint",
            ));
        }
        if input.len() != output.len() {
            return Err(ScuderiaError::animation(format!(
                "range map input has {} breakpoints but output has {} values",
                input.len(),
                output.len()
            )));
        }
        if !input.iter().all(|v| v.is_finite()) {
            return Err(ScuderiaError::animation(
                "range map breakpoints must be finite",
            ));
        }
        if !input.windows(2).all(|w| w[0] <= w[1]) {
            return Err(ScuderiaError::animation(
                "range map breakpoints must be ascending",
            ));
        }
        if !output.windows(2).all(|w| T::compatible(&w[0], &w[1])) {
            return Err(ScuderiaError::animation(
                "range map outputs must share the same template",
            ));
        }

        Ok(Self {
            input: SmallVec::from_vec(input),
            output: SmallVec::from_vec(output),
            ease: Ease::Linear,
        })
    }

    /// Apply `ease` inside every segment.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Breakpoints in ascending order.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Output values, index-aligned with [`RangeMap::input`].
    pub fn output(&self) -> &[T] {
        &self.output
    }

    /// Map `x` through the breakpoints.
    pub fn map(&self, x: f64) -> T {
        let last = self.input.len() - 1;
        if x.is_nan() || x <= self.input[0] {
            return self.output[0].clone();
        }
        if x >= self.input[last] {
            return self.output[last].clone();
        }

        // input[0] < x < input[last], so 1 <= idx <= last.
        let idx = self.input.partition_point(|&b| b <= x);
        let (x0, x1) = (self.input[idx - 1], self.input[idx]);
        let span = x1 - x0;
        if span <= 0.0 {
            return self.output[idx].clone();
        }

        let t = self.ease.apply((x - x0) / span);
        T::lerp(&self.output[idx - 1], &self.output[idx], t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
