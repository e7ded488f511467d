//! Theme vocabulary shared by the resolver, the config layer, and the JS handle.
//!
//! [`Theme`] is the value written to the root element's theme attribute and
//! doubles as the resolver's state. [`Scheme`] is what actually renders and
//! is never `auto`.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// Value of the applied theme attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Explicit light theme.
    Light,
    /// Explicit dark theme.
    Dark,
    /// Follow the system color-scheme signal.
    #[default]
    Auto,
}

impl Theme {
    /// Attribute / storage spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }

    /// Map any requested value onto the three attribute values.
    ///
    /// Only the exact strings `light` and `dark` are kept; everything else,
    /// including `auto`, casing variants, and the empty string, becomes `Auto`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        match raw {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::Auto,
        }
    }

    /// The explicit scheme this theme pins, if any.
    #[must_use]
    pub const fn explicit(self) -> Option<Scheme> {
        match self {
            Self::Light => Some(Scheme::Light),
            Self::Dark => Some(Scheme::Dark),
            Self::Auto => None,
        }
    }
}

impl From<Scheme> for Theme {
    fn from(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Light => Self::Light,
            Scheme::Dark => Self::Dark,
        }
    }
}

impl From<Option<Scheme>> for Theme {
    fn from(preference: Option<Scheme>) -> Self {
        preference.map_or(Self::Auto, Self::from)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The scheme actually rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Light,
    Dark,
}

impl Scheme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Scheme reported by the system signal.
    #[must_use]
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    /// Strict binary flip used by the toggle control.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpret a raw stored value as an explicit preference.
///
/// Absent, `auto`, and unrecognized values all mean "no preference".
#[must_use]
pub fn preference_from_stored(raw: Option<&str>) -> Option<Scheme> {
    raw.map(Theme::normalize).and_then(Theme::explicit)
}

/// Point-in-time view of the resolver, handed to page scripts as JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeSnapshot {
    /// Current value of the theme attribute.
    pub applied: Theme,
    /// What renders right now.
    pub effective: Scheme,
    /// Explicit user choice known to the resolver, `None` if never made.
    pub preference: Option<Scheme>,
}
