//! Placeholder templates.
//!
//! A template is markup with `{{ key }}` placeholders. Rendering replaces each
//! placeholder with the string form of the key's current value. There is no
//! nesting, no expressions, no loops: the text between the braces is trimmed
//! and used as a key, nothing more.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::source::DataSource;
use crate::config::EscapeMode;

/// `{{`, shortest run of non-newline characters, `}}`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("valid placeholder pattern"));

/// An immutable template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The raw template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder keys in order of appearance, trimmed. Repeats are kept.
    pub fn placeholders(&self) -> Vec<&str> {
        PLACEHOLDER
            .captures_iter(&self.source)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .collect()
    }

    /// Substitute every placeholder with the value looked up in `data`.
    ///
    /// Unknown keys render as `undefined`. A template without placeholders
    /// is returned unchanged.
    pub fn render_with<D: DataSource + ?Sized>(&self, data: &D, escape: EscapeMode) -> String {
        let rendered: Cow<'_, str> = PLACEHOLDER.replace_all(&self.source, |caps: &Captures<'_>| {
            let key = caps.get(1).map_or("", |m| m.as_str().trim());
            escape.apply(data.lookup(key).to_string())
        });
        rendered.into_owned()
    }

    /// [`render_with`](Self::render_with) without escaping.
    pub fn render<D: DataSource + ?Sized>(&self, data: &D) -> String {
        self.render_with(data, EscapeMode::Raw)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}
