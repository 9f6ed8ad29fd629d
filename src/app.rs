//! Application wiring: the counter demo.
//!
//! [`CounterApp`] builds one store, one component rendered into `#app`, a
//! click handler on `#increment`, and four bindings. It uses only the public
//! store and component operations.

use crate::component::Component;
use crate::config::BindConfig;
use crate::dom::Document;
use crate::reactive::Store;
use crate::value::Value;

/// Host page the demo mounts into.
pub const HOST_PAGE: &str = r#"<div id="app"></div>"#;

/// The demo's template.
pub const COUNTER_TEMPLATE: &str = r#"
    <div>
      <p id="msg">{{ message }}</p>
      <p id="counter">Count: {{ count }}</p>
      <h4 id="inputValueDisplay">{{ inputValue }}</h4>
      <input id="inputField" type="text" placeholder="Enter text" />
      <button id="increment">Increment</button>
    </div>
  "#;

/// Initial data.
pub fn initial_data() -> Vec<(&'static str, Value)> {
    vec![
        ("message", Value::from("My Simple Javascript Framework!")),
        ("count", Value::from(1000)),
        ("inputValue", Value::from("Type something...")),
    ]
}

/// Selector → key pairs bound after the component renders.
pub const BINDINGS: [(&str, &str); 4] = [
    ("#msg", "message"),
    ("#counter", "count"),
    ("#inputField", "inputValue"),
    ("#inputValueDisplay", "inputValue"),
];

// ---------------------------------------------------------------------------
// CounterApp
// ---------------------------------------------------------------------------

/// The wired-up counter demo.
#[derive(Debug, Clone)]
pub struct CounterApp {
    store: Store,
    component: Component<Store>,
}

impl CounterApp {
    /// Mount the demo into a fresh [`HOST_PAGE`] document.
    pub fn new() -> Self {
        Self::mount(&Document::parse(HOST_PAGE), &BindConfig::default())
    }

    /// Mount the demo into `document`, which should contain `#app`.
    ///
    /// A missing `#app` is logged; the store and bindings are still created
    /// and each binding logs its own missing target.
    pub fn mount(document: &Document, config: &BindConfig) -> Self {
        let store = Store::with_config(document, initial_data(), config.clone());
        let component =
            Component::with_config(document, "#app", COUNTER_TEMPLATE, store.clone(), config);

        let counter = store.downgrade();
        component.on("click", "#increment", move |_, _| {
            if let Some(store) = counter.upgrade() {
                let next = store.get("count").to_number() + 1.0;
                store.set("count", next);
            }
        });

        for (selector, key) in BINDINGS {
            store.bind(selector, key);
        }

        tracing::debug!(inert = component.is_inert(), "counter app mounted");
        Self { store, component }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn component(&self) -> &Component<Store> {
        &self.component
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }
}

impl Default for CounterApp {
    fn default() -> Self {
        Self::new()
    }
}
