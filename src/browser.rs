//! Browser host: `web-sys` implementations of the host traits and the
//! functions exported to the page.
//!
//! Listeners registered here live for the page lifetime. Their closures are
//! handed to JS and forgotten; the browser releases them on unload.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, MediaQueryList, Storage, Window};

use crate::config::SiteConfig;
use crate::error::HostError;
use crate::host::{Handler, PageElement, PageHost, PreferenceStore, SchemeSignal};
use crate::logging;
use crate::page::Page;
use crate::resolver::ThemeEvent;

/// Readable text for a thrown JS value.
fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn listen(target: &EventTarget, event: &'static str, handler: Handler) -> Result<(), HostError> {
    let callback = Closure::wrap(handler);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|err| HostError::Listener { event, reason: describe(&err) })?;
    callback.forget();
    Ok(())
}

// =============================================================
// Elements
// =============================================================

impl PageElement for Element {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), HostError> {
        Element::set_attribute(self, name, value)
            .map_err(|err| HostError::Attribute { name: name.to_owned(), reason: describe(&err) })
    }

    fn swap_class(&self, remove: &str, add: &str) -> Result<(), HostError> {
        let classes = self.class_list();
        classes
            .remove_1(remove)
            .and_then(|()| classes.add_1(add))
            .map_err(|err| HostError::Class(describe(&err)))
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn on_activate(&self, handler: Handler) -> Result<(), HostError> {
        listen(self, "click", handler)
    }
}

// =============================================================
// localStorage
// =============================================================

/// `window.localStorage`, or the reason it could not be opened.
pub struct LocalStore {
    storage: Result<Storage, String>,
}

impl LocalStore {
    fn open(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err("localStorage not provided".to_owned()),
            Err(err) => Err(describe(&err)),
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, HostError> {
        self.storage
            .as_ref()
            .map_err(|reason| HostError::StorageUnavailable(reason.clone()))
    }
}

impl PreferenceStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>, HostError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| HostError::StorageRead { key: key.to_owned(), reason: describe(&err) })
    }

    fn save(&self, key: &str, value: &str) -> Result<(), HostError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| HostError::StorageWrite { key: key.to_owned(), reason: describe(&err) })
    }
}

// =============================================================
// prefers-color-scheme
// =============================================================

/// `matchMedia` result; `None` when the browser does not support the query.
pub struct MediaScheme {
    list: Option<MediaQueryList>,
}

impl SchemeSignal for MediaScheme {
    fn prefers_dark(&self) -> bool {
        self.list.as_ref().is_some_and(MediaQueryList::matches)
    }

    fn subscribe(&self, handler: Handler) -> Result<(), HostError> {
        if let Some(list) = &self.list {
            listen(list, "change", handler)
        } else {
            log::debug!("matchMedia unsupported; system scheme changes not observed");
            Ok(())
        }
    }
}

// =============================================================
// Host
// =============================================================

pub struct BrowserHost {
    window: Window,
    document: Document,
}

impl BrowserHost {
    /// Bind to the global window and its document.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NoWindow`] or [`HostError::NoDocument`] outside a page.
    pub fn from_window() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoDocument)?;
        Ok(Self { window, document })
    }
}

impl PageHost for BrowserHost {
    type Element = Element;
    type Store = LocalStore;
    type Scheme = MediaScheme;

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("invalid selector `{selector}`: {}", describe(&err));
                None
            }
        }
    }

    fn store(&self) -> LocalStore {
        LocalStore::open(&self.window)
    }

    fn scheme(&self, query: &str) -> MediaScheme {
        let list = match self.window.match_media(query) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("matchMedia({query}) failed: {}", describe(&err));
                None
            }
        };
        MediaScheme { list }
    }

    fn current_year(&self) -> u32 {
        js_sys::Date::new_0().get_full_year()
    }
}

// =============================================================
// Exports
// =============================================================

/// Handle returned to the page script after boot.
#[wasm_bindgen]
pub struct SiteHandle {
    page: Page<BrowserHost>,
}

#[wasm_bindgen]
impl SiteHandle {
    /// Same as activating the theme toggle control. Returns the new attribute value.
    #[must_use]
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&self) -> String {
        self.page.theme().handle(ThemeEvent::ToggleRequested);
        self.page.theme().applied().as_str().to_owned()
    }

    #[must_use]
    #[wasm_bindgen(js_name = appliedTheme)]
    pub fn applied_theme(&self) -> String {
        self.page.theme().applied().as_str().to_owned()
    }

    #[must_use]
    #[wasm_bindgen(js_name = effectiveTheme)]
    pub fn effective_theme(&self) -> String {
        self.page.theme().effective_theme().as_str().to_owned()
    }

    /// Applied, effective, and preferred theme as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns a JS string error if serialization fails.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.page.theme().snapshot()).map_err(to_js)
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn boot(config: &SiteConfig) -> Result<SiteHandle, JsValue> {
    logging::init(config.log_level().unwrap_or(log::Level::Info));
    let host = BrowserHost::from_window().map_err(to_js)?;
    let page = Page::boot(&host, config).map_err(to_js)?;
    Ok(SiteHandle { page })
}

/// Wire all page behaviors using the stock markup ids.
///
/// # Errors
///
/// Returns a JS string error outside a browser page, without a root element,
/// or when behaviors were already started on this document.
#[wasm_bindgen]
pub fn start() -> Result<SiteHandle, JsValue> {
    boot(&SiteConfig::default())
}

/// Wire all page behaviors using a JSON [`SiteConfig`]; omitted fields default.
///
/// # Errors
///
/// Returns a JS string error for an invalid config, or as [`start`] does.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(json: &str) -> Result<SiteHandle, JsValue> {
    let config = SiteConfig::from_json(json).map_err(to_js)?;
    boot(&config)
}
