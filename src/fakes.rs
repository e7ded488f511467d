//! In-memory host doubles for unit tests.
//!
//! Clones share state, so a test can keep a handle to an element or store,
//! hand a clone to the code under test and inspect the result afterwards.
//! Registered handlers are fired directly to simulate clicks and
//! media-query changes.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::HostError;
use crate::host::{Handler, PageElement, PageHost, PreferenceStore, SchemeSignal};

fn fire(handlers: &RefCell<Vec<Handler>>) {
    let mut running = std::mem::take(&mut *handlers.borrow_mut());
    for handler in &mut running {
        handler();
    }
    let mut slot = handlers.borrow_mut();
    running.append(&mut slot);
    *slot = running;
}

// =============================================================
// Element
// =============================================================

#[derive(Default)]
struct ElementState {
    attributes: HashMap<String, String>,
    classes: Vec<String>,
    text: Option<String>,
    attribute_writes: usize,
    reject_attributes: bool,
    reject_listeners: bool,
}

#[derive(Clone, Default)]
pub struct FakeElement {
    state: Rc<RefCell<ElementState>>,
    handlers: Rc<RefCell<Vec<Handler>>>,
}

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.state.borrow_mut().attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.state.borrow_mut().classes.push(class.to_owned());
        self
    }

    /// Make every `set_attribute` call fail.
    pub fn rejecting_attributes(self) -> Self {
        self.state.borrow_mut().reject_attributes = true;
        self
    }

    /// Make every `on_activate` call fail.
    pub fn rejecting_listeners(self) -> Self {
        self.state.borrow_mut().reject_listeners = true;
        self
    }

    pub fn classes(&self) -> Vec<String> {
        self.state.borrow().classes.clone()
    }

    pub fn text(&self) -> Option<String> {
        self.state.borrow().text.clone()
    }

    pub fn attribute_writes(&self) -> usize {
        self.state.borrow().attribute_writes
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Simulate a click.
    pub fn activate(&self) {
        fire(&self.handlers);
    }
}

impl PageElement for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        if state.reject_attributes {
            return Err(HostError::Attribute { name: name.to_owned(), reason: "rejected".to_owned() });
        }
        state.attribute_writes += 1;
        state.attributes.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn swap_class(&self, remove: &str, add: &str) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        state.classes.retain(|class| class != remove);
        if !state.classes.iter().any(|class| class == add) {
            state.classes.push(add.to_owned());
        }
        Ok(())
    }

    fn set_text(&self, text: &str) {
        self.state.borrow_mut().text = Some(text.to_owned());
    }

    fn on_activate(&self, handler: Handler) -> Result<(), HostError> {
        if self.state.borrow().reject_listeners {
            return Err(HostError::Listener { event: "click", reason: "rejected".to_owned() });
        }
        self.handlers.borrow_mut().push(handler);
        Ok(())
    }
}

// =============================================================
// Store
// =============================================================

#[derive(Clone, Default)]
pub struct FakeStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    fail_load: Rc<Cell<bool>>,
    fail_save: Rc<Cell<bool>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, value: &str) -> Self {
        self.put(key, value);
        self
    }

    /// Write behind the resolver's back (another tab, devtools).
    pub fn put(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    pub fn clear(&self) {
        self.values.borrow_mut().clear();
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_load.set(fail);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_save.set(fail);
    }
}

impl PreferenceStore for FakeStore {
    fn load(&self, key: &str) -> Result<Option<String>, HostError> {
        if self.fail_load.get() {
            return Err(HostError::StorageUnavailable("disabled".to_owned()));
        }
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), HostError> {
        if self.fail_save.get() {
            return Err(HostError::StorageWrite { key: key.to_owned(), reason: "quota".to_owned() });
        }
        self.put(key, value);
        Ok(())
    }
}

// =============================================================
// Scheme signal
// =============================================================

#[derive(Clone, Default)]
pub struct FakeScheme {
    dark: Rc<Cell<bool>>,
    handlers: Rc<RefCell<Vec<Handler>>>,
    reject: Rc<Cell<bool>>,
}

impl FakeScheme {
    pub fn new(dark: bool) -> Self {
        let scheme = Self::default();
        scheme.dark.set(dark);
        scheme
    }

    pub fn rejecting(self) -> Self {
        self.reject.set(true);
        self
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Flip the system preference and notify subscribers.
    pub fn change(&self, dark: bool) {
        self.dark.set(dark);
        fire(&self.handlers);
    }
}

impl SchemeSignal for FakeScheme {
    fn prefers_dark(&self) -> bool {
        self.dark.get()
    }

    fn subscribe(&self, handler: Handler) -> Result<(), HostError> {
        if self.reject.get() {
            return Err(HostError::Listener { event: "change", reason: "rejected".to_owned() });
        }
        self.handlers.borrow_mut().push(handler);
        Ok(())
    }
}

// =============================================================
// Host
// =============================================================

#[derive(Default)]
pub struct FakeHost {
    pub root: Option<FakeElement>,
    pub ids: HashMap<String, FakeElement>,
    pub selectors: HashMap<String, FakeElement>,
    pub store: FakeStore,
    pub scheme: FakeScheme,
    pub year: u32,
}

impl FakeHost {
    /// A page with a root element and nothing else.
    pub fn bare(dark: bool) -> Self {
        Self {
            root: Some(FakeElement::new().with_class("no-js")),
            scheme: FakeScheme::new(dark),
            year: 2026,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str, element: FakeElement) -> Self {
        self.ids.insert(id.to_owned(), element);
        self
    }

    pub fn with_selector(mut self, selector: &str, element: FakeElement) -> Self {
        self.selectors.insert(selector.to_owned(), element);
        self
    }

    pub fn with_store(mut self, store: FakeStore) -> Self {
        self.store = store;
        self
    }
}

impl PageHost for FakeHost {
    type Element = FakeElement;
    type Store = FakeStore;
    type Scheme = FakeScheme;

    fn root(&self) -> Option<FakeElement> {
        self.root.clone()
    }

    fn by_id(&self, id: &str) -> Option<FakeElement> {
        self.ids.get(id).cloned()
    }

    fn query(&self, selector: &str) -> Option<FakeElement> {
        self.selectors.get(selector).cloned()
    }

    fn store(&self) -> FakeStore {
        self.store.clone()
    }

    fn scheme(&self, _query: &str) -> FakeScheme {
        self.scheme.clone()
    }

    fn current_year(&self) -> u32 {
        self.year
    }
}
