#![forbid(unsafe_code)]

//! Style: hex color decoding, WCAG contrast math, and the site's light/dark
//! palettes.
//!
//! # Example
//! ```
//! use folio_style::color::{contrast_ratio, meets_wcag, TextSize, WcagLevel};
//!
//! let ratio = contrast_ratio("#000000", "#ffffff");
//! assert!((ratio - 21.0).abs() < 1e-9);
//! assert!(meets_wcag("#171717", "#ffffff", WcagLevel::Aaa, TextSize::Normal));
//! ```

pub mod color;
pub mod theme;

pub use color::{Rgb, TextSize, WcagLevel, contrast_ratio, hex_to_rgb, meets_wcag, relative_luminance};
pub use theme::{ContrastCheck, ContrastResult, Palette, ThemeMode, validate_theme_contrast};
