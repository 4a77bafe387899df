#![forbid(unsafe_code)]

//! Core: section registry, site configuration, viewport margins, and
//! user-preference primitives shared by every folio crate.

pub mod config;
pub mod icon;
pub mod margin;
pub mod motion;
pub mod section;

pub use config::{ConfigError, RelayConfig, SiteConfig};
pub use margin::RootMargin;
pub use section::{NAV_ITEMS, NavItem, SectionError, SectionId, SectionRegistry};
