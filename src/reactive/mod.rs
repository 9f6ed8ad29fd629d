//! Reactive state: an observable key/value store with selector bindings.
//!
//! - [`Store::set`]: write a value and synchronously update bound elements.
//! - [`Store::bind`]: register a selector for a key (two-way for inputs).
//! - [`Store::update_dom`]: re-render every target bound to a key.

pub mod store;

pub use store::{Store, UpdateReport, WeakStore};
