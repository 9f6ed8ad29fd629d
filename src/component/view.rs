//! Component: a template rendered into one container element.
//!
//! The container is resolved once at construction. If it is missing the
//! component is inert for its whole life: every render and every `on` call
//! logs the failure and does nothing.

use std::fmt;
use std::rc::{Rc, Weak};

use super::source::DataSource;
use super::template::Template;
use crate::config::{BindConfig, EscapeMode};
use crate::dom::{Document, NodeId};
use crate::error::BindError;
use crate::event::Event;

struct ComponentInner<D> {
    document: Document,
    selector: String,
    template: Template,
    data: D,
    container: Result<NodeId, BindError>,
    escape: EscapeMode,
}

/// A rendered template plus scoped event wiring. Clones share state.
pub struct Component<D> {
    inner: Rc<ComponentInner<D>>,
}

impl<D> Clone for Component<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D: DataSource + 'static> Component<D> {
    /// Resolve `selector` as the container and render `template` into it.
    pub fn new(
        document: &Document,
        selector: impl Into<String>,
        template: impl Into<Template>,
        data: D,
    ) -> Self {
        Self::with_config(document, selector, template, data, &BindConfig::default())
    }

    /// Like [`new`](Self::new), taking the escape mode from `config`.
    pub fn with_config(
        document: &Document,
        selector: impl Into<String>,
        template: impl Into<Template>,
        data: D,
        config: &BindConfig,
    ) -> Self {
        let selector = selector.into();
        let container = document.resolve(&selector).map_err(|err| match err {
            BindError::TargetNotFound { selector } => BindError::ContainerNotFound { selector },
            other => other,
        });
        let component = Self {
            inner: Rc::new(ComponentInner {
                document: document.clone(),
                selector,
                template: template.into(),
                data,
                container,
                escape: config.escape,
            }),
        };
        component.render();
        component
    }

    /// Re-render the template into the container.
    ///
    /// The container's previous children are discarded along with any
    /// listeners attached to them, including those added through
    /// [`on`](Self::on). Returns `false` for an inert component.
    pub fn render(&self) -> bool {
        let container = match &self.inner.container {
            Ok(node) => *node,
            Err(err) => {
                tracing::error!(selector = %self.inner.selector, "{err}");
                return false;
            }
        };
        let html = self.inner.template.render_with(&self.inner.data, self.inner.escape);
        self.inner.document.set_inner_html(container, &html);
        tracing::trace!(selector = %self.inner.selector, "component rendered");
        true
    }

    /// Attach `callback` for `event` on the first container descendant
    /// matching `selector`.
    ///
    /// The callback receives this component and the event. Returns `false`
    /// (after logging) if the component is inert or nothing matches.
    pub fn on(
        &self,
        event: &str,
        selector: &str,
        callback: impl Fn(&Component<D>, &Event) + 'static,
    ) -> bool {
        let container = match &self.inner.container {
            Ok(node) => *node,
            Err(err) => {
                tracing::error!(selector = %self.inner.selector, "{err}");
                return false;
            }
        };
        let node = match self.inner.document.resolve_in(container, selector) {
            Ok(node) => node,
            Err(err) => {
                tracing::error!(event, selector, "{err}");
                return false;
            }
        };

        let weak: Weak<ComponentInner<D>> = Rc::downgrade(&self.inner);
        self.inner.document.add_event_listener(node, event, move |ev| {
            if let Some(inner) = weak.upgrade() {
                callback(&Component { inner }, ev);
            }
        })
    }
}

impl<D> Component<D> {
    /// Whether construction failed to find the container.
    pub fn is_inert(&self) -> bool {
        self.inner.container.is_err()
    }

    /// The container element, if it was found.
    pub fn container(&self) -> Option<NodeId> {
        self.inner.container.as_ref().ok().copied()
    }

    pub fn selector(&self) -> &str {
        &self.inner.selector
    }

    pub fn template(&self) -> &Template {
        &self.inner.template
    }

    /// The data this component renders from.
    pub fn data(&self) -> &D {
        &self.inner.data
    }

    pub fn document(&self) -> &Document {
        &self.inner.document
    }
}

impl<D> fmt::Debug for Component<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("selector", &self.inner.selector)
            .field("container", &self.container())
            .field("template", &self.inner.template.source())
            .finish()
    }
}
