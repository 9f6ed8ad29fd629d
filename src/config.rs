//! Binding configuration.

// ---------------------------------------------------------------------------
// EscapeMode
// ---------------------------------------------------------------------------

/// How placeholder values are inserted into rendered markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// Insert values verbatim. A value containing markup becomes markup.
    #[default]
    Raw,
    /// Escape `& < > " '` so values always render as text.
    Html,
}

impl EscapeMode {
    /// Apply this mode to a stringified value.
    pub fn apply(self, value: String) -> String {
        match self {
            EscapeMode::Raw => value,
            EscapeMode::Html => {
                let mut out = String::with_capacity(value.len());
                for c in value.chars() {
                    match c {
                        '&' => out.push_str("&amp;"),
                        '<' => out.push_str("&lt;"),
                        '>' => out.push_str("&gt;"),
                        '"' => out.push_str("&quot;"),
                        '\'' => out.push_str("&#39;"),
                        _ => out.push(c),
                    }
                }
                out
            }
        }
    }
}

// ---------------------------------------------------------------------------
// BindConfig
// ---------------------------------------------------------------------------

/// Configuration shared by stores and components.
#[derive(Debug, Clone)]
pub struct BindConfig {
    /// Escaping applied to placeholder values when a component renders.
    pub escape: EscapeMode,
    /// Event that two-way bound inputs listen for.
    pub input_event: String,
    /// Whether every store write emits a debug diagnostic.
    pub log_writes: bool,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            escape: EscapeMode::Raw,
            input_event: "input".to_owned(),
            log_writes: true,
        }
    }
}

impl BindConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the escape mode (builder).
    pub fn with_escape(mut self, escape: EscapeMode) -> Self {
        self.escape = escape;
        self
    }

    /// Set the two-way binding event name (builder).
    pub fn with_input_event(mut self, event: impl Into<String>) -> Self {
        self.input_event = event.into();
        self
    }

    /// Enable or disable per-write diagnostics (builder).
    pub fn with_log_writes(mut self, log_writes: bool) -> Self {
        self.log_writes = log_writes;
        self
    }
}
