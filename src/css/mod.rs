//! Selector engine: logos tokenizer, recursive descent parser, matcher.

pub mod matcher;
pub mod model;
pub mod parser;
pub mod tokenizer;

pub use model::{Combinator, CompoundSelector, PseudoClass, Selector, SelectorComponent, SelectorList};
pub use parser::{parse_selector_list, SelectorError};
