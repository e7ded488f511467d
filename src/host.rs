//! Collaborator seams between page behavior and the hosting environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! The resolver, nav toggle, and year stamp only talk to the page through
//! these traits. The `browser` module implements them over `web-sys`; tests
//! implement them with in-memory doubles. Everything runs on the single UI
//! thread, so all methods take `&self` and handles are cheap clones.

use crate::error::HostError;

/// Callback invoked for an interaction event. Lives for the page lifetime.
pub type Handler = Box<dyn FnMut()>;

/// An element handle (root, control, container, metadata, text node host).
pub trait PageElement: Clone + 'static {
    /// Current attribute value, `None` if unset.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set an attribute value.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Attribute`] if the host rejects the write.
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), HostError>;

    /// Remove one class and add another.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Class`] if the class list cannot be updated.
    fn swap_class(&self, remove: &str, add: &str) -> Result<(), HostError>;

    /// Replace the element's text content.
    fn set_text(&self, text: &str);

    /// Register `handler` for the element's activation (click) event.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Listener`] if registration fails.
    fn on_activate(&self, handler: Handler) -> Result<(), HostError>;
}

/// Origin-scoped string key/value store.
pub trait PreferenceStore: 'static {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if storage is disabled or the read throws.
    fn load(&self, key: &str) -> Result<Option<String>, HostError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if storage is disabled or the write throws.
    fn save(&self, key: &str, value: &str) -> Result<(), HostError>;
}

/// Live "system prefers dark" signal.
pub trait SchemeSignal: 'static {
    fn prefers_dark(&self) -> bool;

    /// Register `handler` for signal changes. Never unsubscribed.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Listener`] if registration fails.
    fn subscribe(&self, handler: Handler) -> Result<(), HostError>;
}

/// The page document plus its ambient services.
pub trait PageHost {
    type Element: PageElement;
    type Store: PreferenceStore;
    type Scheme: SchemeSignal;

    /// The document's root element.
    fn root(&self) -> Option<Self::Element>;

    /// Element lookup by id.
    fn by_id(&self, id: &str) -> Option<Self::Element>;

    /// First element matching a CSS selector.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// Handle to the preference store. May be unusable; failures show up on
    /// `load` / `save`.
    fn store(&self) -> Self::Store;

    /// Handle to the system color-scheme signal for `query`.
    fn scheme(&self, query: &str) -> Self::Scheme;

    /// Current calendar year in local time.
    fn current_year(&self) -> u32;
}
