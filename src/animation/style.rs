use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::foundation::error::{ScuderiaError, ScuderiaResult};

/// A presentation value: a plain number or a string template with numeric slots.
///
/// `"50%"`, `"8px"`, `"rotate(45deg)"` and `"rgba(220, 20, 60, 0.5)"` are all parsed into the
/// literal text around each number plus the numbers themselves. Interpolation works on the
/// numbers and re-inserts them into the template, so two values are only interpolable when their
/// literal text matches (see [`StyleValue::compatible`]).
///
/// Hex colors (`#rgb`, `#rrggbb`, `#rrggbbaa`) are normalized to an `rgba(...)` template on parse.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "StyleValueDef", into = "StyleValueDef")]
pub struct StyleValue {
    // Always `numbers.len() + 1` entries.
    literals: SmallVec<[String; 2]>,
    numbers: SmallVec<[f64; 4]>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum StyleValueDef {
    Number(f64),
    Text(String),
}

impl TryFrom<StyleValueDef> for StyleValue {
    type Error = ScuderiaError;

    fn try_from(def: StyleValueDef) -> Result<Self, Self::Error> {
        match def {
            StyleValueDef::Number(v) => Ok(Self::number(v)),
            StyleValueDef::Text(s) => Self::parse(&s),
        }
    }
}

impl From<StyleValue> for StyleValueDef {
    fn from(v: StyleValue) -> Self {
        if v.is_number() {
            Self::Number(v.numbers[0])
        } else {
            Self::Text(v.to_string())
        }
    }
}

impl StyleValue {
    /// A bare number with no surrounding text.
    pub fn number(v: f64) -> Self {
        Self {
            literals: SmallVec::from_iter([String::new(), String::new()]),
            numbers: SmallVec::from_iter([v]),
        }
    }

    /// Parse a template string.
    pub fn parse(s: &str) -> ScuderiaResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::from_hex(hex);
        }

        let bytes = s.as_bytes();
        let mut literals = SmallVec::new();
        let mut numbers = SmallVec::new();
        let mut lit = String::new();
        let mut i = 0;
        while i < bytes.len() {
            if let Some(end) = number_end(bytes, i) {
                let v: f64 = s[i..end].parse().map_err(|e| {
                    ScuderiaError::animation(format!("style value '{s}': bad number: {e}"))
                })?;
                literals.push(std::mem::take(&mut lit));
                numbers.push(v);
                i = end;
            } else {
                let Some(ch) = s[i..].chars().next() else {
                    break;
                };
                lit.push(ch);
                i += ch.len_utf8();
            }
        }
        literals.push(lit);

        Ok(Self { literals, numbers })
    }

    fn from_hex(hex: &str) -> ScuderiaResult<Self> {
        let bad = || ScuderiaError::animation(format!("invalid hex color '#{hex}'"));
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| bad());
        let (r, g, b, a) = match hex.len() {
            3 => {
                let d = |i: usize| channel(&hex[i..i + 1].repeat(2));
                (d(0)?, d(1)?, d(2)?, 255)
            }
            6 | 8 => {
                let a = if hex.len() == 8 {
                    channel(&hex[6..8])?
                } else {
                    255
                };
                (
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                    a,
                )
            }
            _ => return Err(bad()),
        };
        Ok(Self {
            literals: SmallVec::from_iter(
                ["rgba(", ", ", ", ", ", ", ")"].into_iter().map(String::from),
            ),
            numbers: SmallVec::from_iter([
                f64::from(r),
                f64::from(g),
                f64::from(b),
                f64::from(a) / 255.0,
            ]),
        })
    }

    /// `true` when the value is a bare number.
    pub fn is_number(&self) -> bool {
        self.numbers.len() == 1 && self.literals.iter().all(String::is_empty)
    }

    /// First numeric slot, if any.
    pub fn scalar(&self) -> Option<f64> {
        self.numbers.first().copied()
    }

    /// Copy of this template with the first numeric slot replaced by `v`.
    ///
    /// A template without slots becomes a bare number.
    pub fn with_scalar(&self, v: f64) -> Self {
        if self.numbers.is_empty() {
            return Self::number(v);
        }
        let mut out = self.clone();
        out.numbers[0] = v;
        out
    }

    /// Copy of this template with its slots replaced in order by `values`.
    ///
    /// Slots without a replacement keep their value.
    pub fn with_slots(&self, values: impl IntoIterator<Item = f64>) -> Self {
        let mut out = self.clone();
        for (dst, v) in out.numbers.iter_mut().zip(values) {
            *dst = v;
        }
        out
    }

    /// All numeric slots in template order.
    pub fn slots(&self) -> &[f64] {
        &self.numbers
    }

    /// Two values can be interpolated when their literal text and slot count match.
    pub fn compatible(&self, other: &Self) -> bool {
        self.numbers.len() == other.numbers.len() && self.literals == other.literals
    }

    pub(crate) fn lerp_slots(a: &Self, b: &Self, t: f64) -> Self {
        let mut out = a.clone();
        for (dst, (x, y)) in out
            .numbers
            .iter_mut()
            .zip(a.numbers.iter().zip(b.numbers.iter()))
        {
            *dst = x + (y - x) * t;
        }
        out
    }
}

impl FromStr for StyleValue {
    type Err = ScuderiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        Self::number(v)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, lit) in self.literals.iter().enumerate() {
            f.write_str(lit)?;
            if let Some(v) = self.numbers.get(i) {
                write_number(f, *v)?;
            }
        }
        Ok(())
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    let r = (v * 1e4).round() / 1e4;
    if r.fract() == 0.0 && r.abs() < 1e15 {
        write!(f, "{}", r as i64)
    } else {
        write!(f, "{r}")
    }
}

/// End index of a number literal starting at `start`, if one starts there.
///
/// Digits glued to an identifier (`translate3d`, `h1`) are not numbers. An exponent is
/// accepted after the mantissa.
fn number_end(b: &[u8], start: usize) -> Option<usize> {
    if start > 0 {
        let prev = b[start - 1];
        if prev.is_ascii_alphanumeric() || prev == b'_' || prev == b'.' {
            return None;
        }
    }

    let mut i = start;
    if b[i] == b'-' || b[i] == b'+' {
        i += 1;
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return None;
    }

    // `1e-3`, `2E6`; a bare `e` stays literal so units like `1em` survive.
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'-' || b[j] == b'+') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    Some(i)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/style.rs"]
mod tests;
