//! Error types for host collaborators and site configuration.
//!
//! Host failures are almost never fatal: the resolver and the boot sequence
//! log and continue. Only a missing root element aborts [`crate::page::Page::boot`].

/// Failure reported by a host collaborator (document, storage, media query).
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// No global `window` object (not running in a browser main thread).
    #[error("no browser window available")]
    NoWindow,
    /// The window has no document attached.
    #[error("window has no document")]
    NoDocument,
    /// The document has no root element to carry the theme attribute.
    #[error("document has no root element")]
    NoRoot,
    /// Page behaviors were already wired on this document.
    #[error("page behaviors already started")]
    AlreadyBooted,
    /// The origin-scoped key/value store is disabled or inaccessible.
    #[error("preference storage unavailable: {0}")]
    StorageUnavailable(String),
    /// Reading a stored value failed.
    #[error("failed to read `{key}` from storage: {reason}")]
    StorageRead { key: String, reason: String },
    /// Writing a stored value failed (quota, private mode, ...).
    #[error("failed to write `{key}` to storage: {reason}")]
    StorageWrite { key: String, reason: String },
    /// Setting an element attribute failed.
    #[error("failed to set attribute `{name}`: {reason}")]
    Attribute { name: String, reason: String },
    /// Updating an element's class list failed.
    #[error("failed to update class list: {0}")]
    Class(String),
    /// Registering an event listener failed.
    #[error("failed to register `{event}` listener: {reason}")]
    Listener { event: &'static str, reason: String },
}

/// Error returned by [`crate::config::SiteConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The raw text is not a valid JSON site config.
    #[error("failed to parse site config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field that names a key, attribute, or element was left empty.
    #[error("config field `{0}` must not be empty")]
    EmptyField(&'static str),
    /// `log_level` is not one of the `log` crate's level names.
    #[error("unknown log level: {0}")]
    InvalidLogLevel(String),
}
