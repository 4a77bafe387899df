#![forbid(unsafe_code)]

//! User motion and connection preferences.
//!
//! The host reports `prefers-reduced-motion`, `prefers-contrast` and the
//! network's effective connection type; everything here is a pure mapping
//! from those signals to animation and loading settings.

use std::time::Duration;

/// Named animation durations.
pub mod duration {
    use std::time::Duration;

    pub const FAST: Duration = Duration::from_millis(200);
    pub const NORMAL: Duration = Duration::from_millis(300);
    pub const SLOW: Duration = Duration::from_millis(500);
    pub const SLOWER: Duration = Duration::from_millis(800);
}

/// A cubic-bezier easing curve (`x1, y1, x2, y2`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier(pub [f32; 4]);

impl CubicBezier {
    pub const EASE_OUT: Self = Self([0.0, 0.0, 0.2, 1.0]);
    pub const EASE_IN: Self = Self([0.4, 0.0, 1.0, 1.0]);
    pub const EASE_IN_OUT: Self = Self([0.4, 0.0, 0.2, 1.0]);
    pub const BOUNCE: Self = Self([0.68, -0.55, 0.265, 1.55]);
}

/// Easing used by an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    Curve(CubicBezier),
}

/// Effective network connection class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ConnectionType {
    #[cfg_attr(feature = "serde", serde(rename = "slow-2g"))]
    Slow2g,
    #[cfg_attr(feature = "serde", serde(rename = "2g"))]
    TwoG,
    #[cfg_attr(feature = "serde", serde(rename = "3g"))]
    ThreeG,
    #[cfg_attr(feature = "serde", serde(rename = "4g"))]
    FourG,
    #[default]
    Unknown,
}

impl ConnectionType {
    /// Map the host's `effectiveType` string. Unrecognised values are `Unknown`.
    #[must_use]
    pub fn from_effective_type(value: &str) -> Self {
        match value {
            "slow-2g" => Self::Slow2g,
            "2g" => Self::TwoG,
            "3g" => Self::ThreeG,
            "4g" => Self::FourG,
            _ => Self::Unknown,
        }
    }

    /// `slow-2g` and `2g` count as slow.
    #[must_use]
    pub const fn is_slow(self) -> bool {
        matches!(self, Self::Slow2g | Self::TwoG)
    }
}

/// Preferences reported by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionPreferences {
    pub reduced_motion: bool,
    pub high_contrast: bool,
    pub connection: ConnectionType,
}

/// Timing applied to entrance animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub duration: Duration,
    pub easing: Easing,
    pub stagger: Duration,
}

/// Loading behaviour adapted to the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingStrategy {
    /// Image quality (0–100) requested from the optimiser.
    pub image_quality: u8,
    pub enable_animations: bool,
    /// How far ahead of the viewport lazy images start loading.
    pub lazy_load_offset_px: u32,
}

impl MotionPreferences {
    #[must_use]
    pub fn is_slow_connection(&self) -> bool {
        self.connection.is_slow()
    }

    /// Animation timing honouring reduced motion.
    #[must_use]
    pub fn animation_config(&self) -> AnimationConfig {
        if self.reduced_motion {
            AnimationConfig {
                duration: Duration::from_millis(10),
                easing: Easing::Linear,
                stagger: Duration::ZERO,
            }
        } else {
            AnimationConfig {
                duration: duration::NORMAL,
                easing: Easing::Curve(CubicBezier::EASE_IN_OUT),
                stagger: Duration::from_millis(100),
            }
        }
    }

    /// Loading strategy for the current connection.
    #[must_use]
    pub fn loading_strategy(&self) -> LoadingStrategy {
        let slow = self.is_slow_connection();
        LoadingStrategy {
            image_quality: if slow { 60 } else { 85 },
            enable_animations: !slow && !self.reduced_motion,
            lazy_load_offset_px: if slow { 200 } else { 50 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_flattens_animation() {
        let prefs = MotionPreferences {
            reduced_motion: true,
            ..Default::default()
        };
        let cfg = prefs.animation_config();
        assert_eq!(cfg.easing, Easing::Linear);
        assert_eq!(cfg.stagger, Duration::ZERO);
        assert!(cfg.duration < duration::FAST);
    }

    #[test]
    fn default_animation_uses_ease_in_out() {
        let cfg = MotionPreferences::default().animation_config();
        assert_eq!(cfg.duration, duration::NORMAL);
        assert_eq!(cfg.easing, Easing::Curve(CubicBezier::EASE_IN_OUT));
    }

    #[test]
    fn slow_connection_strategy() {
        let prefs = MotionPreferences {
            connection: ConnectionType::from_effective_type("slow-2g"),
            ..Default::default()
        };
        let s = prefs.loading_strategy();
        assert_eq!(s.image_quality, 60);
        assert!(!s.enable_animations);
        assert_eq!(s.lazy_load_offset_px, 200);
    }

    #[test]
    fn reduced_motion_disables_animations_on_fast_connection() {
        let prefs = MotionPreferences {
            reduced_motion: true,
            connection: ConnectionType::FourG,
            ..Default::default()
        };
        let s = prefs.loading_strategy();
        assert_eq!(s.image_quality, 85);
        assert!(!s.enable_animations);
    }

    #[test]
    fn unknown_connection_is_not_slow() {
        assert!(!ConnectionType::from_effective_type("wifi").is_slow());
        assert!(ConnectionType::from_effective_type("2g").is_slow());
    }
}
