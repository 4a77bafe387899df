#![forbid(unsafe_code)]

//! Typed icon keys.
//!
//! Content data refers to icons by string key. Keys are parsed once into
//! [`Icon`] so rendering code can match exhaustively; an unknown key is a
//! parse error at load time instead of a silent fallback at render time.

use std::fmt;
use std::str::FromStr;

/// Icons used by the site's social and contact links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    GitHub,
    LinkedIn,
    Kaggle,
    Twitter,
    Mail,
    Phone,
    Location,
}

impl Icon {
    /// Every icon, in declaration order.
    pub const ALL: [Icon; 7] = [
        Icon::GitHub,
        Icon::LinkedIn,
        Icon::Kaggle,
        Icon::Twitter,
        Icon::Mail,
        Icon::Phone,
        Icon::Location,
    ];

    /// Content key for this icon.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Icon::GitHub => "github",
            Icon::LinkedIn => "linkedin",
            Icon::Kaggle => "kaggle",
            Icon::Twitter => "twitter",
            Icon::Mail => "mail",
            Icon::Phone => "phone",
            Icon::Location => "location",
        }
    }

    /// Accessible label for the icon.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Icon::GitHub => "GitHub",
            Icon::LinkedIn => "LinkedIn",
            Icon::Kaggle => "Kaggle",
            Icon::Twitter => "Twitter",
            Icon::Mail => "Email",
            Icon::Phone => "Phone",
            Icon::Location => "Location",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An icon key with no matching [`Icon`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIcon(pub String);

impl fmt::Display for UnknownIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown icon key {:?}", self.0)
    }
}

impl std::error::Error for UnknownIcon {}

impl FromStr for Icon {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Icon::ALL
            .into_iter()
            .find(|icon| icon.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownIcon(s.to_string()))
    }
}

/// An outbound profile or contact link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub id: &'static str,
    pub label: &'static str,
    pub url: &'static str,
    pub icon: Icon,
}

impl SocialLink {
    /// Whether the link leaves the site (opens in a new tab).
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }
}

/// Footer and contact-section links.
pub const SOCIAL_LINKS: [SocialLink; 5] = [
    SocialLink {
        id: "github",
        label: "GitHub",
        url: "https://github.com",
        icon: Icon::GitHub,
    },
    SocialLink {
        id: "linkedin",
        label: "LinkedIn",
        url: "https://linkedin.com",
        icon: Icon::LinkedIn,
    },
    SocialLink {
        id: "kaggle",
        label: "Kaggle",
        url: "https://kaggle.com",
        icon: Icon::Kaggle,
    },
    SocialLink {
        id: "twitter",
        label: "Twitter",
        url: "https://x.com",
        icon: Icon::Twitter,
    },
    SocialLink {
        id: "email",
        label: "Email",
        url: "mailto:hello@example.com",
        icon: Icon::Mail,
    },
];
