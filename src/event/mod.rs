//! Event system: listener storage types and bubbling dispatch.

pub mod dispatch;
pub mod listener;

pub use dispatch::{bubble_path, dispatch};
pub use listener::{Event, Handler};
pub(crate) use listener::RegisteredListener;
