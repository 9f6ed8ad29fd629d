//! Selector AST: SelectorList, Selector, CompoundSelector.

/// Pseudo-classes the matcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    /// `:first-child`
    FirstChild,
    /// `:last-child`
    LastChild,
    /// `:disabled` (element carries a `disabled` attribute).
    Disabled,
}

impl PseudoClass {
    /// Look up a pseudo-class by name (without the leading `:`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "first-child" => Some(Self::FirstChild),
            "last-child" => Some(Self::LastChild),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// A single simple selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Type selector: matches the tag name, case-insensitively (e.g. `input`).
    Type(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Attribute selector: `[name]` or `[name=value]`.
    Attribute { name: String, value: Option<String> },
    /// Pseudo-class: `:first-child`, etc.
    PseudoClass(PseudoClass),
}

/// A combinator between compound selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
}

/// A sequence of simple selectors with no combinator between them.
///
/// `input.wide[type=text]` is one compound with three components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// A complex selector: compounds joined by combinators.
///
/// Stored right-to-left friendly: `subject` is the rightmost compound, and
/// `ancestors` lists `(combinator, compound)` pairs walking leftward. For
/// `#app > div p`, `subject` is `p` and `ancestors` is
/// `[(Descendant, div), (Child, #app)]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selector {
    pub subject: CompoundSelector,
    pub ancestors: Vec<(Combinator, CompoundSelector)>,
}

/// A comma-separated selector list. Matches if any selector matches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}
