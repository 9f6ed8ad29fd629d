//! Template components: placeholder rendering and scoped listeners.

pub mod source;
pub mod template;
pub mod view;

pub use source::DataSource;
pub use template::Template;
pub use view::Component;
