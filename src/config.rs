//! Site configuration: element ids, selectors, storage key, and colors.
//!
//! Every field has a default matching the stock site markup, so pages that
//! call `start()` never need a config. Pages with different markup pass a
//! partial JSON object to `start_with_config`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::theme::{Scheme, Theme};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// How the resolver decides what to do when the system signal changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalPolicy {
    /// Re-read the store on every change, so another tab's choice is honored.
    #[default]
    Reread,
    /// Use the preference held in memory since startup (updated by toggles).
    Captured,
}

/// Theme resolver settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub attribute: String,
    pub toggle_id: String,
    pub meta_selector: String,
    /// Metadata hint color when the light theme is applied.
    pub light_color: String,
    /// Metadata hint color for `dark` and `auto`.
    pub dark_color: String,
    pub dark_query: String,
    pub signal_policy: SignalPolicy,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_owned(),
            attribute: "data-theme".to_owned(),
            toggle_id: "theme-toggle".to_owned(),
            meta_selector: "meta[name=\"theme-color\"]".to_owned(),
            light_color: "#0ea5e9".to_owned(),
            dark_color: "#38bdf8".to_owned(),
            dark_query: "(prefers-color-scheme: dark)".to_owned(),
            signal_policy: SignalPolicy::Reread,
        }
    }
}

impl ThemeConfig {
    /// Metadata hint color for an applied theme.
    #[must_use]
    pub fn hint_color(&self, applied: Theme) -> &str {
        match applied.explicit() {
            Some(Scheme::Light) => &self.light_color,
            Some(Scheme::Dark) | None => &self.dark_color,
        }
    }
}

/// Navigation toggle settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub toggle_id: String,
    pub container_selector: String,
    pub expanded_attribute: String,
    pub open_attribute: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_id: "menu-toggle".to_owned(),
            container_selector: ".site-header".to_owned(),
            expanded_attribute: "aria-expanded".to_owned(),
            open_attribute: "data-nav-open".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearConfig {
    pub element_id: String,
}

impl Default for YearConfig {
    fn default() -> Self {
        Self { element_id: "year".to_owned() }
    }
}

/// Top-level configuration for the page behaviors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub theme: ThemeConfig,
    pub nav: NavConfig,
    pub year: YearConfig,
    /// Class added to the root once the script runs.
    pub script_class: String,
    /// Class removed from the root once the script runs.
    pub no_script_class: String,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            nav: NavConfig::default(),
            year: YearConfig::default(),
            script_class: "js".to_owned(),
            no_script_class: "no-js".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed JSON, an empty key, attribute,
    /// selector, media query, or class name, or an unknown log level.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the fields the behaviors cannot work without.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::from_json`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("theme.storage_key", &self.theme.storage_key),
            ("theme.attribute", &self.theme.attribute),
            ("theme.meta_selector", &self.theme.meta_selector),
            ("theme.dark_query", &self.theme.dark_query),
            ("nav.container_selector", &self.nav.container_selector),
            ("nav.expanded_attribute", &self.nav.expanded_attribute),
            ("nav.open_attribute", &self.nav.open_attribute),
            ("script_class", &self.script_class),
            ("no_script_class", &self.no_script_class),
        ];
        if let Some((field, _)) = required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::EmptyField(field));
        }
        self.log_level()?;
        Ok(())
    }

    /// The configured `log` level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] if the name is not recognized.
    pub fn log_level(&self) -> Result<log::Level, ConfigError> {
        log::Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}
