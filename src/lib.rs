//! # wirebind
//!
//! Minimal reactive data binding over an in-memory element tree.
//!
//! A [`Store`] holds keyed values and a registry of selector bindings. Every
//! [`Store::set`] synchronously rewrites the elements bound to that key, and
//! `<input>`/`<textarea>` targets write user input back into the store. A
//! [`Component`] renders a `{{ key }}` template into a container element and
//! attaches listeners scoped to what it rendered.
//!
//! ## Core Systems
//!
//! - **[`value`]**: the dynamic [`Value`] type and its string conversion
//! - **[`reactive`]**: the [`Store`] and its binding registry
//! - **[`component`]**: templates, data sources, components
//! - **[`dom`]**: slotmap-backed element arena, markup parser, [`Document`] handle
//! - **[`css`]**: selector tokenizer, parser and matcher
//! - **[`event`]**: listeners and bubbling dispatch
//! - **[`app`]**: the counter demo wiring
//! - **[`testing`]**: [`Pilot`](testing::Pilot) and diagnostic capture
//!
//! Resolution failures never panic or propagate out of the store or
//! component; they are reported through `tracing` at `ERROR` level.
//!
//! ```
//! use wirebind::{Component, Document, Store};
//!
//! let doc = Document::parse(r#"<div id="app"></div>"#);
//! let store = Store::new(&doc, [("count", 0)]);
//! Component::new(&doc, "#app", r#"<b id="n">{{ count }}</b>"#, store.clone());
//! store.bind("#n", "count");
//! store.set("count", 5);
//! assert_eq!(doc.text_content(doc.resolve("#n").unwrap()), "5");
//! ```

// Foundation
pub mod config;
pub mod error;
pub mod value;

// Host document
pub mod css;
pub mod dom;
pub mod event;

// Binding
pub mod component;
pub mod reactive;

// Application
pub mod app;
pub mod testing;

pub use app::CounterApp;
pub use component::{Component, DataSource, Template};
pub use config::{BindConfig, EscapeMode};
pub use dom::{Document, NodeId};
pub use error::BindError;
pub use event::Event;
pub use reactive::{Store, UpdateReport, WeakStore};
pub use value::Value;
