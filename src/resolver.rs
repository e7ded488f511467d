//! Theme resolution: stored preference vs. system signal vs. user toggle.
//!
//! The resolver's state is the root element's theme attribute (`light`,
//! `dark`, or `auto`). It is the only writer of that attribute.
//!
//! STATE MACHINE
//! =============
//! - Initial state comes from the stored preference (absent or unrecognized
//!   means `Auto`).
//! - `SchemeChanged` re-applies `Auto` while no explicit preference exists,
//!   which refreshes the metadata hint. It never overrides an explicit choice.
//! - `ToggleRequested` flips the *effective* scheme and pins it. `Auto` is
//!   never a toggle destination.
//!
//! Host failures (storage disabled, attribute writes rejected) are logged and
//! swallowed. Losing persistence only means the choice is forgotten next visit.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::{SignalPolicy, ThemeConfig};
use crate::error::HostError;
use crate::host::{PageElement, PreferenceStore, SchemeSignal};
use crate::theme::{Scheme, Theme, ThemeSnapshot, preference_from_stored};

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;

/// Attribute on the metadata hint element that carries the chrome color.
const HINT_ATTRIBUTE: &str = "content";

/// Events the resolver reacts to after startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeEvent {
    /// The system color-scheme signal changed.
    SchemeChanged,
    /// The user activated the theme toggle control.
    ToggleRequested,
}

/// A (re)application of the theme attribute.
///
/// `from == to` is legal: re-applying `Auto` on a system change is a self-loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Theme,
    pub to: Theme,
}

/// Owns the theme attribute and its collaborators.
pub struct ThemeResolver<E, S, P> {
    root: E,
    meta: Option<E>,
    scheme: S,
    store: P,
    config: ThemeConfig,
    /// Explicit choice known to this resolver.
    preference: Cell<Option<Scheme>>,
    /// Last toggle could not be persisted; storage is stale.
    unsaved: Cell<bool>,
}

impl<E, S, P> ThemeResolver<E, S, P>
where
    E: PageElement,
    S: SchemeSignal,
    P: PreferenceStore,
{
    /// Build a resolver. Nothing is read or written until [`Self::initialize`].
    pub fn new(root: E, meta: Option<E>, scheme: S, store: P, config: ThemeConfig) -> Self {
        Self {
            root,
            meta,
            scheme,
            store,
            config,
            preference: Cell::new(None),
            unsaved: Cell::new(false),
        }
    }

    // --- Core operations ---

    /// Set the theme attribute and the metadata hint color.
    pub fn apply(&self, theme: Theme) {
        if let Err(err) = self.root.set_attribute(&self.config.attribute, theme.as_str()) {
            log::warn!("theme attribute not applied: {err}");
        }
        if let Some(meta) = &self.meta {
            if let Err(err) = meta.set_attribute(HINT_ATTRIBUTE, self.config.hint_color(theme)) {
                log::warn!("theme-color hint not updated: {err}");
            }
        }
        log::debug!("theme applied: {theme}");
    }

    /// Apply an arbitrary requested value; anything but `light`/`dark` means `auto`.
    pub fn apply_raw(&self, requested: &str) {
        self.apply(Theme::normalize(requested));
    }

    /// Current attribute value. A missing attribute reads as `Auto`.
    #[must_use]
    pub fn applied(&self) -> Theme {
        self.root
            .attribute(&self.config.attribute)
            .map_or(Theme::Auto, |raw| Theme::normalize(&raw))
    }

    /// What renders right now: the explicit attribute, else the system signal.
    #[must_use]
    pub fn effective_theme(&self) -> Scheme {
        self.applied()
            .explicit()
            .unwrap_or_else(|| Scheme::from_prefers_dark(self.scheme.prefers_dark()))
    }

    /// Explicit preference known to the resolver.
    #[must_use]
    pub fn preference(&self) -> Option<Scheme> {
        self.preference.get()
    }

    #[must_use]
    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            applied: self.applied(),
            effective: self.effective_theme(),
            preference: self.preference(),
        }
    }

    // --- Lifecycle ---

    /// Read the stored preference, apply it, and follow the system signal.
    ///
    /// Runs to completion before any handler can fire. A failed subscription
    /// is logged; the initial theme still applies.
    pub fn initialize(self: &Rc<Self>) {
        let preference = self.load_preference();
        self.preference.set(preference);
        self.apply(Theme::from(preference));

        let resolver = Rc::clone(self);
        let subscribed = self.scheme.subscribe(Box::new(move || {
            resolver.handle(ThemeEvent::SchemeChanged);
        }));
        if let Err(err) = subscribed {
            log::warn!("system color-scheme changes will not be tracked: {err}");
        }
    }

    /// Route activations of `control` to [`ThemeEvent::ToggleRequested`].
    ///
    /// # Errors
    ///
    /// Returns the host error if the listener cannot be registered.
    pub fn bind_toggle(self: &Rc<Self>, control: &E) -> Result<(), HostError> {
        let resolver = Rc::clone(self);
        control.on_activate(Box::new(move || {
            resolver.handle(ThemeEvent::ToggleRequested);
        }))
    }

    /// Process one event. Returns the transition, or `None` if ignored.
    pub fn handle(&self, event: ThemeEvent) -> Option<Transition> {
        let transition = match event {
            ThemeEvent::SchemeChanged => self.on_scheme_changed(),
            ThemeEvent::ToggleRequested => Some(self.toggle()),
        };
        match transition {
            Some(Transition { from, to }) => log::debug!("{event:?}: {from} -> {to}"),
            None => log::debug!("{event:?}: ignored, explicit preference in effect"),
        }
        transition
    }

    // --- Transitions ---

    fn on_scheme_changed(&self) -> Option<Transition> {
        let from = self.applied();
        let to = Theme::from(self.live_preference());
        // Auto is re-applied even when unchanged so the hint color refreshes.
        if to == Theme::Auto || from != to {
            self.apply(to);
            Some(Transition { from, to })
        } else {
            None
        }
    }

    fn toggle(&self) -> Transition {
        let from = self.applied();
        let next = self.effective_theme().flipped();
        match self.store.save(&self.config.storage_key, next.as_str()) {
            Ok(()) => self.unsaved.set(false),
            Err(err) => {
                log::warn!("theme preference not persisted: {err}");
                self.unsaved.set(true);
            }
        }
        self.preference.set(Some(next));
        let to = Theme::from(next);
        self.apply(to);
        Transition { from, to }
    }

    // --- Preference sources ---

    fn load_preference(&self) -> Option<Scheme> {
        match self.store.load(&self.config.storage_key) {
            Ok(raw) => preference_from_stored(raw.as_deref()),
            Err(err) => {
                log::warn!("stored theme unavailable, using system preference: {err}");
                None
            }
        }
    }

    fn live_preference(&self) -> Option<Scheme> {
        match self.config.signal_policy {
            SignalPolicy::Captured => self.preference.get(),
            SignalPolicy::Reread if self.unsaved.get() => self.preference.get(),
            SignalPolicy::Reread => match self.store.load(&self.config.storage_key) {
                Ok(raw) => {
                    let preference = preference_from_stored(raw.as_deref());
                    self.preference.set(preference);
                    preference
                }
                Err(err) => {
                    log::warn!("stored theme unavailable, keeping in-memory preference: {err}");
                    self.preference.get()
                }
            },
        }
    }
}
