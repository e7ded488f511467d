//! Responsive navigation toggle.
//!
//! The expanded flag has no storage of its own: it lives in the control's
//! `aria-expanded` attribute and is mirrored into the container's
//! `data-nav-open` attribute on every activation. Nothing persists across
//! page loads.

use std::rc::Rc;

use crate::config::NavConfig;
use crate::error::HostError;
use crate::host::PageElement;

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

/// The menu control and the container it opens.
pub struct NavToggle<E> {
    control: E,
    container: E,
    expanded_attribute: String,
    open_attribute: String,
}

impl<E: PageElement> NavToggle<E> {
    #[must_use]
    pub fn new(control: E, container: E, config: &NavConfig) -> Self {
        Self {
            control,
            container,
            expanded_attribute: config.expanded_attribute.clone(),
            open_attribute: config.open_attribute.clone(),
        }
    }

    /// Whether the control currently reports the menu as expanded.
    ///
    /// Only the exact string `"true"` counts.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.control.attribute(&self.expanded_attribute).as_deref() == Some("true")
    }

    /// Flip the flag onto both attributes. Returns the new state.
    pub fn toggle(&self) -> bool {
        let next = !self.is_expanded();
        let value = if next { "true" } else { "false" };
        for (element, name) in [
            (&self.control, &self.expanded_attribute),
            (&self.container, &self.open_attribute),
        ] {
            if let Err(err) = element.set_attribute(name, value) {
                log::warn!("navigation state not mirrored: {err}");
            }
        }
        log::debug!("navigation expanded: {next}");
        next
    }

    /// Route control activations to [`Self::toggle`].
    ///
    /// # Errors
    ///
    /// Returns the host error if the listener cannot be registered.
    pub fn bind(self: &Rc<Self>) -> Result<(), HostError> {
        let nav = Rc::clone(self);
        self.control.on_activate(Box::new(move || {
            nav.toggle();
        }))
    }
}
