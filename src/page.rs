//! Page assembly: the one object built at load that owns every behavior.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Page::boot` runs the startup sequence in order and finishes before any
//! handler can fire. Optional elements that are missing are skipped with a
//! debug log. Only a document without a root element fails the boot.

use std::rc::Rc;

use crate::config::SiteConfig;
use crate::error::HostError;
use crate::host::{PageElement, PageHost};
use crate::nav::NavToggle;
use crate::resolver::ThemeResolver;
use crate::year::stamp_year;

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

/// Root attribute marking a document whose behaviors are already wired.
pub const BOOT_MARKER: &str = "data-site-behavior";

/// Theme resolver type for a given host.
pub type HostResolver<H> =
    ThemeResolver<<H as PageHost>::Element, <H as PageHost>::Scheme, <H as PageHost>::Store>;

/// Behaviors wired onto one page.
pub struct Page<H: PageHost> {
    theme: Rc<HostResolver<H>>,
    nav: Option<Rc<NavToggle<H::Element>>>,
    theme_toggle_bound: bool,
    year_stamped: bool,
}

impl<H: PageHost> Page<H> {
    /// Run the startup sequence against `host`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NoRoot`] if the document has no root element, or
    /// [`HostError::AlreadyBooted`] if behaviors were already wired on it.
    pub fn boot(host: &H, config: &SiteConfig) -> Result<Self, HostError> {
        let root = host.root().ok_or(HostError::NoRoot)?;
        // One boot per document: listeners are never removed.
        if root.attribute(BOOT_MARKER).is_some() {
            return Err(HostError::AlreadyBooted);
        }
        if let Err(err) = root.set_attribute(BOOT_MARKER, "ready") {
            log::warn!("boot marker not set: {err}");
        }

        if let Err(err) = root.swap_class(&config.no_script_class, &config.script_class) {
            log::warn!("scripted marker not set: {err}");
        }

        let theme_config = &config.theme;
        let meta = host.query(&theme_config.meta_selector);
        if meta.is_none() {
            log::debug!("no theme-color hint element ({})", theme_config.meta_selector);
        }
        let theme = Rc::new(ThemeResolver::new(
            root,
            meta,
            host.scheme(&theme_config.dark_query),
            host.store(),
            theme_config.clone(),
        ));
        theme.initialize();

        let theme_toggle_bound = if let Some(control) = host.by_id(&theme_config.toggle_id) {
            bind_or_warn("theme toggle", theme.bind_toggle(&control))
        } else {
            log::debug!("no theme toggle control (#{})", theme_config.toggle_id);
            false
        };

        let nav = if let (Some(control), Some(container)) =
            (host.by_id(&config.nav.toggle_id), host.query(&config.nav.container_selector))
        {
            let nav = Rc::new(NavToggle::new(control, container, &config.nav));
            bind_or_warn("navigation toggle", nav.bind()).then_some(nav)
        } else {
            log::debug!(
                "navigation toggle needs #{} and {}; skipped",
                config.nav.toggle_id,
                config.nav.container_selector
            );
            None
        };

        let year_stamped = stamp_year(host.by_id(&config.year.element_id).as_ref(), host.current_year());

        log::info!(
            "page behaviors ready: theme={} toggle={} nav={} year={}",
            theme.applied(),
            theme_toggle_bound,
            nav.is_some(),
            year_stamped
        );
        Ok(Self { theme, nav, theme_toggle_bound, year_stamped })
    }

    #[must_use]
    pub fn theme(&self) -> &HostResolver<H> {
        &self.theme
    }

    #[must_use]
    pub fn nav(&self) -> Option<&NavToggle<H::Element>> {
        self.nav.as_deref()
    }

    /// Whether a theme toggle control was found and wired.
    #[must_use]
    pub fn theme_toggle_bound(&self) -> bool {
        self.theme_toggle_bound
    }

    #[must_use]
    pub fn year_stamped(&self) -> bool {
        self.year_stamped
    }
}

fn bind_or_warn(what: &str, result: Result<(), HostError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::warn!("{what} not wired: {err}");
            false
        }
    }
}
