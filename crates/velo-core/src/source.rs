//! Lookup services of the design tool.
//!
//! The design tool resolves component identities, shared styles and design
//! variables asynchronously. [`DesignSource`] is the seam the translator
//! consumes; [`InMemorySource`] answers from plain maps and backs the JSON
//! [`DesignDocument`] format used by the command line.

use crate::errors::SourceError;
use crate::node::Node;
use crate::types::{ComponentIdentity, NodeId, StyleId, VariableId};
use indexmap::IndexMap;

/// A component as reported by the design tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRef {
    /// Component id in `namespace:local` form.
    pub id: String,
    pub name: String,
}

impl ComponentRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The parsed identity, if the id is well formed.
    pub fn identity(&self) -> Option<ComponentIdentity> {
        ComponentIdentity::parse(&self.id).ok()
    }
}

/// A shared paint, text or corner style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub name: String,
}

/// A design variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
}

/// Asynchronous lookups into the design tool.
///
/// Each lookup reports a missing reference as `Ok(None)`; an `Err` is a fault
/// of the service itself.
#[allow(async_fn_in_trait)]
pub trait DesignSource {
    /// The main component an instance node was created from.
    async fn main_component(&self, instance: &NodeId) -> Result<Option<ComponentRef>, SourceError>;

    /// A component by id, used to follow instance-swap properties.
    async fn component(&self, id: &str) -> Result<Option<ComponentRef>, SourceError>;

    /// A shared style by id.
    async fn style(&self, id: &StyleId) -> Result<Option<Style>, SourceError>;

    /// A design variable by id.
    async fn variable(&self, id: &VariableId) -> Result<Option<Variable>, SourceError>;
}

/// A [`DesignSource`] answering from in-memory tables.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct InMemorySource {
    /// Instance node id -> main component id.
    pub instances: IndexMap<NodeId, String>,
    /// Component id -> component name.
    pub components: IndexMap<String, String>,
    /// Style id -> style name.
    pub styles: IndexMap<StyleId, String>,
    /// Variable id -> variable name.
    pub variables: IndexMap<VariableId, String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the main component of an instance.
    pub fn with_instance(mut self, instance: impl Into<String>, component_id: impl Into<String>) -> Self {
        self.instances.insert(NodeId::new(instance), component_id.into());
        self
    }

    pub fn with_component(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.components.insert(id.into(), name.into());
        self
    }

    pub fn with_style(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.styles.insert(StyleId::new(id), name.into());
        self
    }

    pub fn with_variable(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.variables.insert(VariableId::new(id), name.into());
        self
    }

    fn component_ref(&self, id: &str) -> ComponentRef {
        let name = self.components.get(id).cloned().unwrap_or_default();
        ComponentRef::new(id, name)
    }
}

impl DesignSource for InMemorySource {
    async fn main_component(&self, instance: &NodeId) -> Result<Option<ComponentRef>, SourceError> {
        Ok(self.instances.get(instance).map(|id| self.component_ref(id)))
    }

    async fn component(&self, id: &str) -> Result<Option<ComponentRef>, SourceError> {
        Ok(self.components.contains_key(id).then(|| self.component_ref(id)))
    }

    async fn style(&self, id: &StyleId) -> Result<Option<Style>, SourceError> {
        Ok(self.styles.get(id).map(|name| Style { name: name.clone() }))
    }

    async fn variable(&self, id: &VariableId) -> Result<Option<Variable>, SourceError> {
        Ok(self.variables.get(id).map(|name| Variable { name: name.clone() }))
    }
}

/// A selection exported from the design tool together with the answers to
/// every lookup it needs.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesignDocument {
    /// The selected node; absent when nothing was selected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub root: Option<Node>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub source: InMemorySource,
}

impl DesignDocument {
    pub fn new(root: Node, source: InMemorySource) -> Self {
        Self {
            root: Some(root),
            source,
        }
    }
}
