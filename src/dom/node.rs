//! Node types: NodeId, NodeKind, NodeData.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Tags whose elements never have children or an end tag.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Tags that carry a value slot and emit `input` events.
pub const INPUT_CAPABLE_TAGS: &[&str] = &["input", "textarea"];

/// What kind of node this is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The document root. Has no tag and is never matched by selectors.
    Document,
    /// An element such as `<p>` or `<input>`.
    Element,
    /// A run of (decoded) character data.
    Text(String),
    /// A `<!-- ... -->` comment, stored without the delimiters.
    Comment(String),
}

/// Data associated with a single DOM node.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    /// Lowercase tag name. Empty for non-element nodes.
    pub tag: String,
    /// The `id` attribute.
    pub id: Option<String>,
    /// The whitespace-separated entries of the `class` attribute.
    pub classes: Vec<String>,
    /// All other attributes, names lowercased, in source order.
    pub attributes: Vec<(String, String)>,
    /// Live value slot. Only present on input-capable elements.
    pub value: Option<String>,
    /// The start tag exactly as it appeared in parsed markup.
    pub source_tag: Option<String>,
    /// The end tag exactly as it appeared in parsed markup. `None` when the
    /// element was closed implicitly or built programmatically.
    pub source_end_tag: Option<String>,
    /// Raw character data of a parsed text node, entities undecoded.
    /// Serialization only uses it while it still decodes to the node's text.
    pub source_text: Option<String>,
    /// Whether the start tag was written `<tag ... />`.
    pub self_closing: bool,
}

impl NodeData {
    fn blank(kind: NodeKind) -> Self {
        Self {
            kind,
            tag: String::new(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            value: None,
            source_tag: None,
            source_end_tag: None,
            source_text: None,
            self_closing: false,
        }
    }

    /// The document root node.
    pub fn document() -> Self {
        Self::blank(NodeKind::Document)
    }

    /// An element with the given tag. Input-capable tags start with an empty value slot.
    pub fn element(tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        let value = INPUT_CAPABLE_TAGS
            .contains(&tag.as_str())
            .then(String::new);
        Self {
            tag,
            value,
            ..Self::blank(NodeKind::Element)
        }
    }

    /// A text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::blank(NodeKind::Text(content.into()))
    }

    /// A comment node.
    pub fn comment(content: impl Into<String>) -> Self {
        Self::blank(NodeKind::Comment(content.into()))
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(&class.into());
        self
    }

    /// Set an attribute (builder). `id` and `class` are routed to their fields.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(&name.into(), value.into());
        self
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Whether this element has a value slot (`<input>`, `<textarea>`).
    pub fn is_input_capable(&self) -> bool {
        self.is_element() && INPUT_CAPABLE_TAGS.contains(&self.tag.as_str())
    }

    /// Whether this element can never have children.
    pub fn is_void(&self) -> bool {
        self.is_element() && VOID_TAGS.contains(&self.tag.as_str())
    }

    /// Check whether this node has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Look up an attribute by (case-insensitive) name.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match name.to_ascii_lowercase().as_str() {
            "id" => self.id.clone(),
            "class" if !self.classes.is_empty() => Some(self.classes.join(" ")),
            "class" => None,
            lower => self
                .attributes
                .iter()
                .find(|(n, _)| n == lower)
                .map(|(_, v)| v.clone()),
        }
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// Setting `value` on an input-capable element also seeds its value slot.
    pub fn set_attribute(&mut self, name: &str, value: String) {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "id" => self.id = Some(value),
            "class" => {
                self.classes.clear();
                for class in value.split_ascii_whitespace() {
                    self.add_class(class);
                }
            }
            _ => {
                if lower == "value" && self.tag == "input" {
                    self.value = Some(value.clone());
                }
                match self.attributes.iter_mut().find(|(n, _)| *n == lower) {
                    Some(slot) => slot.1 = value,
                    None => self.attributes.push((lower, value)),
                }
            }
        }
    }
}
