//! Page interactivity for a static personal site, compiled to WebAssembly.
//!
//! The page loads the module and calls `start()` once. From then on the
//! crate owns three behaviors: light/dark/auto theme selection persisted in
//! `localStorage`, the responsive navigation toggle, and the copyright year.
//! Everything runs on the page's UI thread; handlers never block.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Theme and scheme values, normalization, stored-preference parsing |
//! | [`resolver`] | Theme state machine: stored preference vs. system signal vs. toggle |
//! | [`nav`] | Navigation expanded/collapsed toggle |
//! | [`year`] | Copyright year stamp |
//! | [`page`] | Startup sequence and the object owning all behaviors |
//! | [`host`] | Traits the behaviors use to reach the document, storage, and media query |
//! | [`config`] | Element ids, selectors, storage key, colors, signal policy |
//! | [`error`] | Host and config error types |
//! | `browser` | `web-sys` host and JS exports (feature `hydrate`) |
//! | `logging` | Console logger setup (feature `hydrate`) |

pub mod config;
pub mod error;
pub mod host;
pub mod nav;
pub mod page;
pub mod resolver;
pub mod theme;
pub mod year;

#[cfg(feature = "hydrate")]
pub mod browser;
#[cfg(feature = "hydrate")]
mod logging;

#[cfg(test)]
mod fakes;
