//! Test helpers: the [`Pilot`] interaction driver and diagnostic capture.
//!
//! Use [`capture_diagnostics`] to assert on what the store and components
//! log, and the [`Pilot`] to simulate clicks and typing by selector.

pub mod capture;
pub mod pilot;

pub use capture::{capture_diagnostics, Diagnostic};
pub use pilot::Pilot;
