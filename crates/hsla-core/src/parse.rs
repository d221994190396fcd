//! Parsing of the `hsla(H, S%, L%, A)` string form.

use std::fmt;
use std::str::FromStr;

use crate::hsla::Hsla;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseHslaError {
    Empty,
    InvalidFunc,
    InvalidNumber,
    /// A component is infinite or NaN, or alpha lies outside `[0, 1]`.
    ///
    /// Hue, saturation and lightness are otherwise taken as written, since
    /// `saturate`/`lighten` may legitimately leave them above 100%.
    OutOfRange,
}

impl fmt::Display for ParseHslaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseHslaError::*;
        let msg = match self {
            Empty => "empty color string",
            InvalidFunc => "expected hsla(<hue>, <saturation>%, <lightness>%, <alpha>)",
            InvalidNumber => "invalid number in hsla()",
            OutOfRange => "component out of range",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ParseHslaError {}

fn number(s: &str) -> Result<f64, ParseHslaError> {
    let v: f64 = s.trim().parse().map_err(|_| ParseHslaError::InvalidNumber)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseHslaError::OutOfRange)
    }
}

fn percent(s: &str) -> Result<f64, ParseHslaError> {
    let s = s.trim().strip_suffix('%').ok_or(ParseHslaError::InvalidFunc)?;
    Ok(fraction(number(s)?))
}

/// Undo the `* 100.0` applied by `Display`.
///
/// Several fractions can print as the same percentage; among the neighbours of
/// `pct / 100.0` that multiply back to `pct`, the one with the shortest decimal
/// form wins.
fn fraction(pct: f64) -> f64 {
    let q = pct / 100.0;
    if q == 0.0 {
        return q;
    }
    let bits = q.to_bits();
    [0i64, 1, -1, 2, -2]
        .into_iter()
        .map(|d| f64::from_bits(bits.wrapping_add_signed(d)))
        .filter(|x| *x * 100.0 == pct)
        .min_by_key(|x| x.to_string().len())
        .unwrap_or(q)
}

impl FromStr for Hsla {
    type Err = ParseHslaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ParseHslaError::*;

        let s = s.trim();
        if s.is_empty() {
            return Err(Empty);
        }

        let body = s
            .strip_prefix("hsla(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or(InvalidFunc)?;

        let parts: Vec<&str> = body.split(',').collect();
        let [h, sat, light, alpha] = parts.as_slice() else {
            return Err(InvalidFunc);
        };

        let a = number(alpha)?;
        if !(0.0..=1.0).contains(&a) {
            return Err(OutOfRange);
        }

        Ok(Hsla::new(number(h)?, percent(sat)?, percent(light)?, a))
    }
}
