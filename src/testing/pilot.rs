//! Pilot: drive a [`Document`] by selector, the way a user would.
//!
//! Every method resolves its selector against the whole document. A selector
//! that matches nothing is not a panic: actions report that nothing happened
//! and reads return `None`.

use crate::app::CounterApp;
use crate::dom::{Document, NodeId};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A selector-driven interaction helper for tests.
///
/// # Examples
///
/// ```
/// use wirebind::testing::Pilot;
///
/// let pilot = Pilot::counter();
/// pilot.click("#increment");
/// assert_eq!(pilot.text("#counter").as_deref(), Some("1001"));
/// ```
#[derive(Debug, Clone)]
pub struct Pilot {
    document: Document,
    app: Option<CounterApp>,
}

impl Pilot {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
            app: None,
        }
    }

    /// A pilot over a freshly mounted [`CounterApp`], which it keeps alive.
    pub fn counter() -> Self {
        let app = CounterApp::new();
        Self {
            document: app.document().clone(),
            app: Some(app),
        }
    }

    /// The app this pilot owns, if it was created by [`counter`](Self::counter).
    pub fn app(&self) -> Option<&CounterApp> {
        self.app.as_ref()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn find(&self, selector: &str) -> Option<NodeId> {
        self.document.query_selector(selector).ok().flatten()
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Click the first match. Returns the number of listeners that ran.
    pub fn click(&self, selector: &str) -> usize {
        self.find(selector)
            .map_or(0, |node| self.document.click(node))
    }

    /// Replace the first match's value with `text` and fire `input`.
    ///
    /// Returns `false` if nothing matches or the match has no value slot.
    pub fn type_text(&self, selector: &str, text: &str) -> bool {
        self.find(selector)
            .is_some_and(|node| self.document.input(node, text))
    }

    /// Dispatch an arbitrary event at the first match.
    pub fn dispatch(&self, selector: &str, event: &str) -> usize {
        self.find(selector)
            .map_or(0, |node| self.document.dispatch(node, event))
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Text content of the first match.
    pub fn text(&self, selector: &str) -> Option<String> {
        self.find(selector).map(|node| self.document.text_content(node))
    }

    /// Value slot of the first match.
    pub fn value(&self, selector: &str) -> Option<String> {
        self.find(selector).and_then(|node| self.document.value(node))
    }

    /// Inner markup of the first match.
    pub fn markup(&self, selector: &str) -> Option<String> {
        self.find(selector).map(|node| self.document.inner_html(node))
    }

    /// Whether anything matches.
    pub fn exists(&self, selector: &str) -> bool {
        self.find(selector).is_some()
    }
}
