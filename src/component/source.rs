//! Data sources a component can render from.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::reactive::Store;
use crate::value::Value;

/// Read access to keyed values at render time.
///
/// Lookups of absent keys return [`Value::Undefined`].
pub trait DataSource {
    fn lookup(&self, key: &str) -> Value;
}

impl DataSource for Store {
    fn lookup(&self, key: &str) -> Value {
        self.get(key)
    }
}

impl DataSource for HashMap<String, Value> {
    fn lookup(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl DataSource for BTreeMap<String, Value> {
    fn lookup(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl<T: DataSource + ?Sized> DataSource for Rc<T> {
    fn lookup(&self, key: &str) -> Value {
        (**self).lookup(key)
    }
}

impl<T: DataSource + ?Sized> DataSource for RefCell<T> {
    fn lookup(&self, key: &str) -> Value {
        self.borrow().lookup(key)
    }
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn lookup(&self, key: &str) -> Value {
        (**self).lookup(key)
    }
}
