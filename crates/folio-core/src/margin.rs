#![forbid(unsafe_code)]

//! Root margins for viewport intersection.
//!
//! A root margin grows (positive) or shrinks (negative) the viewport box
//! used to decide whether a section intersects. It is written in CSS margin
//! shorthand: one to four lengths, each `Npx` or `N%` (a bare `0` is allowed).
//! Percentages resolve against the viewport height for top/bottom and the
//! viewport width for left/right.

use std::fmt;
use std::str::FromStr;

/// A single margin length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginValue {
    /// Absolute pixels.
    Px(f64),
    /// Percentage of the reference dimension.
    Percent(f64),
}

impl MarginValue {
    /// Resolve to pixels against `reference`.
    #[must_use]
    pub fn resolve(self, reference: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => reference * pct / 100.0,
        }
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Parse failure for a root margin string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootMarginError {
    input: String,
    reason: &'static str,
}

impl fmt::Display for RootMarginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid root margin {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for RootMarginError {}

/// Margin around the observation root, in CSS order (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

/// Pixel insets produced by [`RootMargin::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// Zero margin on all sides.
    pub const ZERO: Self = Self {
        top: MarginValue::Px(0.0),
        right: MarginValue::Px(0.0),
        bottom: MarginValue::Px(0.0),
        left: MarginValue::Px(0.0),
    };

    /// Resolve against a viewport of `width` x `height` pixels.
    #[must_use]
    pub fn resolve(&self, width: f64, height: f64) -> ResolvedMargin {
        ResolvedMargin {
            top: self.top.resolve(height),
            right: self.right.resolve(width),
            bottom: self.bottom.resolve(height),
            left: self.left.resolve(width),
        }
    }

    /// Vertical extent `(top, bottom)` of the observation root, in
    /// viewport-relative pixels.
    #[must_use]
    pub fn vertical_bounds(&self, viewport_height: f64) -> (f64, f64) {
        let top = -self.top.resolve(viewport_height);
        let bottom = viewport_height + self.bottom.resolve(viewport_height);
        (top, bottom.max(top))
    }

    /// The viewport-relative y a section's top edge must cross (moving up)
    /// to count as entered.
    ///
    /// With the default margin this is half the viewport height.
    #[must_use]
    pub fn entry_line(&self, viewport_height: f64) -> f64 {
        self.vertical_bounds(viewport_height).1
    }
}

impl Default for RootMargin {
    /// `0px 0px -50% 0px`: a section enters once it crosses the middle of
    /// the viewport from below.
    fn default() -> Self {
        Self {
            top: MarginValue::Px(0.0),
            right: MarginValue::Px(0.0),
            bottom: MarginValue::Percent(-50.0),
            left: MarginValue::Px(0.0),
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

fn parse_value(token: &str) -> Option<MarginValue> {
    if let Some(num) = token.strip_suffix("px") {
        return num.parse().ok().filter(|v: &f64| v.is_finite()).map(MarginValue::Px);
    }
    if let Some(num) = token.strip_suffix('%') {
        return num
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .map(MarginValue::Percent);
    }
    match token.parse::<f64>() {
        Ok(v) if v == 0.0 => Some(MarginValue::Px(0.0)),
        _ => None,
    }
}

impl FromStr for RootMargin {
    type Err = RootMarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| RootMarginError {
            input: s.to_string(),
            reason,
        };
        let mut values = Vec::with_capacity(4);
        for token in s.split_whitespace() {
            values.push(parse_value(token).ok_or_else(|| err("lengths must be px or %"))?);
        }
        let [top, right, bottom, left] = match values.as_slice() {
            [] => return Err(err("expected one to four lengths")),
            [a] => [*a, *a, *a, *a],
            [v, h] => [*v, *h, *v, *h],
            [t, h, b] => [*t, *h, *b, *h],
            [t, r, b, l] => [*t, *r, *b, *l],
            _ => return Err(err("expected one to four lengths")),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}
