//! Store: an observable key/value map that pushes writes into bound elements.
//!
//! Every write goes through [`Store::set`], which records the value, logs it,
//! and synchronously rewrites every element bound to that key before
//! returning. Bindings are selector strings resolved afresh on each update, so
//! an element that appears later (for example after a component renders) is
//! picked up on the next write.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::BindConfig;
use crate::dom::{Document, NodeId};
use crate::error::BindError;
use crate::value::Value;

// ---------------------------------------------------------------------------
// UpdateReport
// ---------------------------------------------------------------------------

/// Outcome of one update pass over a key's bound targets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    /// Targets that were resolved and rewritten.
    pub updated: usize,
    /// Targets that could not be resolved, in binding order.
    pub errors: Vec<BindError>,
}

impl UpdateReport {
    /// Whether every bound target was updated.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

struct StoreInner {
    document: Document,
    config: BindConfig,
    data: RefCell<BTreeMap<String, Value>>,
    /// Key → selectors, in registration order. Append-only.
    bindings: RefCell<HashMap<String, Vec<String>>>,
}

/// Observable data with selector bindings. Clones share the same data.
#[derive(Clone)]
pub struct Store {
    inner: Rc<StoreInner>,
}

/// Non-owning handle to a [`Store`], for use inside listeners.
#[derive(Clone)]
pub struct WeakStore {
    inner: Weak<StoreInner>,
}

impl WeakStore {
    /// The store, if it is still alive.
    pub fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl Store {
    /// Wrap `data` with the default configuration.
    pub fn new<K, V>(document: &Document, data: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::with_config(document, data, BindConfig::default())
    }

    /// Wrap `data` with an explicit configuration.
    pub fn with_config<K, V>(
        document: &Document,
        data: impl IntoIterator<Item = (K, V)>,
        config: BindConfig,
    ) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let data = data
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: Rc::new(StoreInner {
                document: document.clone(),
                config,
                data: RefCell::new(data),
                bindings: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// The document bindings resolve against.
    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    pub fn config(&self) -> &BindConfig {
        &self.inner.config
    }

    /// A weak handle that does not keep the store alive.
    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    // ── Data ─────────────────────────────────────────────────────────

    /// Current value for `key`; [`Value::Undefined`] if never set.
    pub fn get(&self, key: &str) -> Value {
        self.inner
            .data
            .borrow()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.data.borrow().contains_key(key)
    }

    /// All keys that hold a value, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.inner.data.borrow().keys().cloned().collect()
    }

    /// A copy of the whole data map.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.inner.data.borrow().clone()
    }

    /// Store `value` under `key` and push it to every element bound to `key`.
    ///
    /// Any key is accepted, known or not. Resolution failures are logged and
    /// skipped; this always returns `true`.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        let value = value.into();
        if self.inner.config.log_writes {
            tracing::debug!(key = %key, value = %value, "data updated");
        }
        self.inner.data.borrow_mut().insert(key.clone(), value);
        self.update_dom(&key);
        true
    }

    // ── Bindings ─────────────────────────────────────────────────────

    /// Bind the element matching `selector` to `key`.
    ///
    /// The target is updated immediately. If it is an `<input>` or
    /// `<textarea>`, user input on it is written back to `key`; other targets
    /// bound to the same key stay one-way.
    pub fn bind(&self, selector: impl Into<String>, key: impl Into<String>) {
        let selector = selector.into();
        let key = key.into();

        self.inner
            .bindings
            .borrow_mut()
            .entry(key.clone())
            .or_default()
            .push(selector.clone());

        self.update_dom(&key);

        // Failures were already reported by the update pass.
        let document = self.document();
        if let Ok(Some(node)) = document.query_selector(&selector) {
            if document.is_input_capable(node) {
                self.attach_write_back(node, key);
            }
        }
    }

    /// Selectors bound to `key`, in registration order.
    pub fn bindings(&self, key: &str) -> Vec<String> {
        self.inner
            .bindings
            .borrow()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    fn attach_write_back(&self, node: NodeId, key: String) {
        let store = self.downgrade();
        let event_name = &self.inner.config.input_event;
        self.document().add_event_listener(node, event_name, move |event| {
            let Some(store) = store.upgrade() else {
                return;
            };
            if let Some(text) = event.document().value(event.target()) {
                store.set(key.as_str(), Value::Text(text));
            }
        });
    }

    /// Rewrite every element bound to `key` with its current value.
    ///
    /// Input-capable targets get their value slot set; all others have their
    /// text content replaced. Each target is resolved independently: a
    /// missing one is logged and the rest still update.
    pub fn update_dom(&self, key: &str) -> UpdateReport {
        let mut report = UpdateReport::default();
        let selectors = self.bindings(key);
        if selectors.is_empty() {
            return report;
        }

        let text = self.get(key).to_string();
        let document = self.document();
        for selector in &selectors {
            match document.resolve(selector) {
                Ok(node) => {
                    if document.is_input_capable(node) {
                        document.set_value(node, &text);
                    } else {
                        document.set_text_content(node, &text);
                    }
                    report.updated += 1;
                }
                Err(err) => {
                    tracing::error!(key, selector = %selector, "{err}");
                    report.errors.push(err);
                }
            }
        }
        report
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("data", &self.inner.data.borrow())
            .field("bindings", &self.inner.bindings.borrow())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<p id="a">old</p><p id="b"></p><input id="field"><span id="echo"></span>"#;

    fn setup() -> (Document, Store) {
        let doc = Document::parse(PAGE);
        let store = Store::new(
            &doc,
            [("message", Value::from("hi")), ("count", Value::from(0))],
        );
        (doc, store)
    }

    fn text(doc: &Document, selector: &str) -> String {
        doc.text_content(doc.resolve(selector).unwrap())
    }

    fn value(doc: &Document, selector: &str) -> Option<String> {
        doc.value(doc.resolve(selector).unwrap())
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let (_doc, store) = setup();
        assert_eq!(store.get("message"), Value::from("hi"));
        assert_eq!(store.get("missing"), Value::Undefined);
        assert!(store.contains("count"));
        assert!(!store.contains("missing"));
    }

    #[test]
    fn set_accepts_new_keys() {
        let (_doc, store) = setup();
        assert!(store.set("fresh", true));
        assert_eq!(store.get("fresh"), Value::Bool(true));
        assert_eq!(store.keys(), vec!["count", "fresh", "message"]);
    }

    #[test]
    fn bind_renders_current_value_immediately() {
        let (doc, store) = setup();
        store.bind("#a", "message");
        assert_eq!(text(&doc, "#a"), "hi");
    }

    #[test]
    fn fan_out_to_every_bound_target() {
        let (doc, store) = setup();
        store.bind("#a", "count");
        store.bind("#b", "count");
        store.set("count", 5);
        assert_eq!(text(&doc, "#a"), "5");
        assert_eq!(text(&doc, "#b"), "5");
    }

    #[test]
    fn second_binding_leaves_first_alone() {
        let (doc, store) = setup();
        store.bind("#a", "message");
        doc.set_text_content(doc.resolve("#a").unwrap(), "edited");
        store.bind("#b", "message");
        assert_eq!(text(&doc, "#a"), "edited");
        assert_eq!(text(&doc, "#b"), "hi");
    }

    #[test]
    fn unbound_key_touches_nothing() {
        let (doc, store) = setup();
        store.set("message", "changed");
        assert_eq!(text(&doc, "#a"), "old");
    }

    #[test]
    fn input_target_gets_value_slot() {
        let (doc, store) = setup();
        store.bind("#field", "message");
        assert_eq!(value(&doc, "#field").as_deref(), Some("hi"));
        assert_eq!(text(&doc, "#field"), "");
    }

    #[test]
    fn undefined_value_renders_as_text() {
        let (doc, store) = setup();
        store.bind("#a", "nothing");
        assert_eq!(text(&doc, "#a"), "undefined");
    }

    #[test]
    fn user_input_writes_back_and_fans_out() {
        let (doc, store) = setup();
        store.bind("#field", "message");
        store.bind("#echo", "message");
        let field = doc.resolve("#field").unwrap();
        assert!(doc.input(field, "typed"));
        assert_eq!(store.get("message"), Value::from("typed"));
        assert_eq!(text(&doc, "#echo"), "typed");
    }

    #[test]
    fn non_input_targets_stay_one_way() {
        let (doc, store) = setup();
        store.bind("#a", "message");
        let a = doc.resolve("#a").unwrap();
        assert_eq!(doc.listener_count(a), 0);
    }

    #[test]
    fn custom_input_event() {
        let doc = Document::parse(PAGE);
        let store = Store::with_config(
            &doc,
            [("message", "hi")],
            BindConfig::new().with_input_event("change"),
        );
        store.bind("#field", "message");
        let field = doc.resolve("#field").unwrap();
        doc.input(field, "ignored");
        assert_eq!(store.get("message"), Value::from("hi"));
        doc.input_with(field, "kept", "change");
        assert_eq!(store.get("message"), Value::from("kept"));
    }

    #[test]
    fn missing_target_is_isolated() {
        let (doc, store) = setup();
        store.bind("#a", "count");
        store.bind("#ghost", "count");
        store.bind("#b", "count");
        store.set("count", 7);
        let report = store.update_dom("count");
        assert_eq!(report.updated, 2);
        assert_eq!(
            report.errors,
            vec![BindError::TargetNotFound {
                selector: "#ghost".into()
            }]
        );
        assert!(!report.is_clean());
        assert_eq!(text(&doc, "#a"), "7");
        assert_eq!(text(&doc, "#b"), "7");
    }

    #[test]
    fn invalid_selector_is_isolated() {
        let (doc, store) = setup();
        store.bind("#a", "count");
        store.bind("a +", "count");
        store.set("count", 3);
        assert_eq!(text(&doc, "#a"), "3");
        let report = store.update_dom("count");
        assert!(matches!(report.errors[0], BindError::InvalidSelector { .. }));
    }

    #[test]
    fn non_ascii_id_can_be_bound() {
        let doc = Document::parse(r#"<p id="ü"></p>"#);
        let store = Store::new(&doc, [("k", "grün")]);
        store.bind("#ü", "k");
        assert!(store.update_dom("k").is_clean());
        assert_eq!(text(&doc, "#ü"), "grün");
    }

    #[test]
    fn snapshot_copies_current_data() {
        let (_doc, store) = setup();
        let before = store.snapshot();
        store.set("count", 9);
        assert_eq!(before.get("count"), Some(&Value::from(0)));
        assert_eq!(store.snapshot().get("count"), Some(&Value::from(9)));
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn bindings_are_append_only_and_ordered() {
        let (_doc, store) = setup();
        store.bind("#a", "count");
        store.bind("#b", "count");
        store.bind("#a", "count");
        assert_eq!(store.bindings("count"), vec!["#a", "#b", "#a"]);
        assert!(store.bindings("message").is_empty());
    }

    #[test]
    fn late_element_is_picked_up_on_next_write() {
        let doc = Document::parse(r#"<div id="host"></div>"#);
        let store = Store::new(&doc, [("count", 1)]);
        store.bind("#late", "count");
        let host = doc.resolve("#host").unwrap();
        doc.set_inner_html(host, r#"<b id="late"></b>"#);
        store.set("count", 2);
        assert_eq!(text(&doc, "#late"), "2");
    }

    #[test]
    fn weak_store_does_not_keep_alive() {
        let (_doc, store) = setup();
        let weak = store.downgrade();
        assert!(weak.upgrade().is_some());
        drop(store);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn input_after_store_dropped_is_ignored() {
        let (doc, store) = setup();
        store.bind("#field", "message");
        drop(store);
        let field = doc.resolve("#field").unwrap();
        assert!(doc.input(field, "late"));
    }
}
