#![forbid(unsafe_code)]

//! Page sections and the navigation contract.
//!
//! The page layout and the navigation bar agree on a fixed, ordered list of
//! anchor ids. [`SectionRegistry`] holds that list and is the only place the
//! order is defined; scroll-spy tie-breaking relies on it.

use std::borrow::Borrow;
use std::fmt;

/// Stable identifier of a page section (the anchor target id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SectionId(String);

impl SectionId {
    /// Create a section id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The in-page anchor (`#id`) for this section.
    #[must_use]
    pub fn href(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A navigation bar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Section id the entry scrolls to.
    pub id: &'static str,
    /// Visible label.
    pub label: &'static str,
    /// Anchor href.
    pub href: &'static str,
}

/// The site's navigation entries, in page order.
pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem {
        id: "home",
        label: "Home",
        href: "#home",
    },
    NavItem {
        id: "about",
        label: "About",
        href: "#about",
    },
    NavItem {
        id: "skills",
        label: "Skills",
        href: "#skills",
    },
    NavItem {
        id: "projects",
        label: "Projects",
        href: "#projects",
    },
    NavItem {
        id: "research",
        label: "Research",
        href: "#research",
    },
    NavItem {
        id: "contact",
        label: "Contact",
        href: "#contact",
    },
];

/// Errors raised when building a [`SectionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// No section ids were supplied.
    Empty,
    /// The same id was registered twice.
    Duplicate(SectionId),
}

impl fmt::Display for SectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "section registry needs at least one section"),
            Self::Duplicate(id) => write!(f, "section \"{id}\" registered more than once"),
        }
    }
}

impl std::error::Error for SectionError {}

/// Ordered, duplicate-free set of registered section ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    ids: Vec<SectionId>,
}

impl SectionRegistry {
    /// Build a registry from ids in registration order.
    pub fn new<I, S>(ids: I) -> Result<Self, SectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionId>,
    {
        let mut out: Vec<SectionId> = Vec::new();
        for id in ids {
            let id = id.into();
            if out.contains(&id) {
                return Err(SectionError::Duplicate(id));
            }
            out.push(id);
        }
        if out.is_empty() {
            return Err(SectionError::Empty);
        }
        Ok(Self { ids: out })
    }

    /// The registry used by the site navigation.
    #[must_use]
    pub fn site() -> Self {
        Self {
            ids: NAV_ITEMS.iter().map(|item| SectionId::new(item.id)).collect(),
        }
    }

    /// Registration index of `id`, if registered.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|s| s.as_str() == id)
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Look up the registered id matching `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SectionId> {
        self.ids.iter().find(|s| s.as_str() == id)
    }

    /// Iterate ids in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.ids.iter()
    }

    /// Number of registered sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false`; an empty registry cannot be built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Registered ids as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[SectionId] {
        &self.ids
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::site()
    }
}
