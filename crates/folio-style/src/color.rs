//! Hex colors, relative luminance, and WCAG contrast.
//!
//! All functions are pure. Hex input is six hex digits with an optional
//! leading `#`, case-insensitive; anything else fails to decode.

use std::fmt;

/// Contrast ratio required for AA, normal text.
pub const AA_NORMAL: f64 = 4.5;
/// Contrast ratio required for AA, large text.
pub const AA_LARGE: f64 = 3.0;
/// Contrast ratio required for AAA, normal text.
pub const AAA_NORMAL: f64 = 7.0;
/// Contrast ratio required for AAA, large text.
pub const AAA_LARGE: f64 = 4.5;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode `#rrggbb` / `rrggbb`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = digits.as_bytes();
        if bytes.len() != 6 || !bytes.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// WCAG relative luminance in [0, 1].
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        relative_luminance(self.r, self.g, self.b)
    }

    /// WCAG contrast ratio against `other`, in [1, 21]. Symmetric.
    #[must_use]
    pub fn contrast_ratio(self, other: Self) -> f64 {
        ratio_from_luminance(self.relative_luminance(), other.relative_luminance())
    }

    /// Linear blend toward `target`; `factor` 0 keeps `self`, 1 yields `target`.
    #[must_use]
    pub fn mix(self, target: Self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 * (1.0 - f) + b as f64 * f).round() as u8;
        Self::new(
            lerp(self.r, target.r),
            lerp(self.g, target.g),
            lerp(self.b, target.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Decode a hex color. See [`Rgb::from_hex`].
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    Rgb::from_hex(hex)
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance of 8-bit sRGB channels.
#[must_use]
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let r = srgb_to_linear(r as f64 / 255.0);
    let g = srgb_to_linear(g as f64 / 255.0);
    let b = srgb_to_linear(b as f64 / 255.0);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

fn ratio_from_luminance(a: f64, b: f64) -> f64 {
    let lighter = a.max(b);
    let darker = a.min(b);
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio of two hex colors; `0.0` if either fails to decode.
#[must_use]
pub fn contrast_ratio(color_a: &str, color_b: &str) -> f64 {
    match (Rgb::from_hex(color_a), Rgb::from_hex(color_b)) {
        (Some(a), Some(b)) => a.contrast_ratio(b),
        _ => 0.0,
    }
}

/// WCAG conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WcagLevel {
    #[default]
    Aa,
    Aaa,
}

/// Text size class; large is 18pt regular or 14pt bold and up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextSize {
    #[default]
    Normal,
    Large,
}

impl WcagLevel {
    /// Minimum contrast ratio for this level at `size`.
    #[must_use]
    pub const fn threshold(self, size: TextSize) -> f64 {
        match (self, size) {
            (Self::Aa, TextSize::Normal) => AA_NORMAL,
            (Self::Aa, TextSize::Large) => AA_LARGE,
            (Self::Aaa, TextSize::Normal) => AAA_NORMAL,
            (Self::Aaa, TextSize::Large) => AAA_LARGE,
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aa => f.write_str("AA"),
            Self::Aaa => f.write_str("AAA"),
        }
    }
}

/// Whether `ratio` satisfies `level` at `size`.
#[must_use]
pub fn meets_ratio(ratio: f64, level: WcagLevel, size: TextSize) -> bool {
    ratio >= level.threshold(size)
}

/// Whether `foreground` on `background` satisfies `level` at `size`.
///
/// Undecodable colors have ratio 0 and never pass.
#[must_use]
pub fn meets_wcag(foreground: &str, background: &str, level: WcagLevel, size: TextSize) -> bool {
    meets_ratio(contrast_ratio(foreground, background), level, size)
}

/// AA for normal text, the default check.
#[must_use]
pub fn meets_wcag_aa(foreground: &str, background: &str) -> bool {
    meets_wcag(foreground, background, WcagLevel::Aa, TextSize::Normal)
}

/// Ten tints of `base`, from the color itself to white.
///
/// Returns `None` if `base` fails to decode.
#[must_use]
pub fn accessible_palette(base: &str) -> Option<Vec<String>> {
    let rgb = Rgb::from_hex(base)?;
    Some(
        (0..10)
            .map(|i| rgb.mix(Rgb::WHITE, i as f64 / 9.0).to_hex())
            .collect(),
    )
}

/// The candidate with the highest contrast against `bg`; first wins on ties.
#[must_use]
pub fn best_text_color(bg: Rgb, candidates: &[Rgb]) -> Option<Rgb> {
    let mut iter = candidates.iter().copied();
    let mut best = iter.next()?;
    let mut best_ratio = best.contrast_ratio(bg);
    for candidate in iter {
        let ratio = candidate.contrast_ratio(bg);
        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
    }
    Some(best)
}
