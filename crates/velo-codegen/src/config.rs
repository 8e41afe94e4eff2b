//! Generation configuration and the component identity table.

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use velo_core::ComponentIdentity;

/// Semantic widget kind of a component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Button,
    Badge,
    SegmentedControl,
    InputField,
    Checkbox,
    Icon,
    Image,
    Divider,
    LeadingItem,
    TrailingItem,
    ListRow,
    Container,
}

impl ComponentKind {
    /// Whether emitting this kind records something into the view state.
    pub fn is_stateful(&self) -> bool {
        matches!(self, Self::SegmentedControl | Self::InputField | Self::Checkbox)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Maps component identities to component kinds.
///
/// Plain namespaces map straight to a kind. Compound namespaces carry their
/// own local-id table; an identity in a compound namespace whose local id is
/// not listed is a [`ComponentKind::Container`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentTable {
    pub namespaces: IndexMap<String, ComponentKind>,
    pub compound: IndexMap<String, IndexMap<String, ComponentKind>>,
}

/// Namespace of the structural components (dividers, list items).
pub const STRUCTURAL_NAMESPACE: &str = "171";

/// Namespace of the icon set.
pub const ICONOGRAPHY_NAMESPACE: &str = "104";

impl ComponentTable {
    /// An empty table; every identity resolves to `Container`.
    pub fn empty() -> Self {
        Self {
            namespaces: IndexMap::new(),
            compound: IndexMap::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>, kind: ComponentKind) -> Self {
        self.namespaces.insert(namespace.into(), kind);
        self
    }

    pub fn with_compound(
        mut self,
        namespace: impl Into<String>,
        local: impl Into<String>,
        kind: ComponentKind,
    ) -> Self {
        self.compound
            .entry(namespace.into())
            .or_default()
            .insert(local.into(), kind);
        self
    }

    /// Resolve an identity to a kind.
    pub fn lookup(&self, identity: &ComponentIdentity) -> ComponentKind {
        if let Some(locals) = self.compound.get(&identity.namespace) {
            return locals
                .get(&identity.local)
                .copied()
                .unwrap_or(ComponentKind::Container);
        }
        self.namespaces
            .get(&identity.namespace)
            .copied()
            .unwrap_or(ComponentKind::Container)
    }
}

impl Default for ComponentTable {
    fn default() -> Self {
        use ComponentKind::*;

        Self::empty()
            .with_namespace("119", Button)
            .with_namespace("159", Button)
            .with_namespace("152", Badge)
            .with_namespace("161", SegmentedControl)
            .with_namespace("125", InputField)
            .with_namespace("153", Checkbox)
            .with_namespace("17", Image)
            .with_namespace("352", Image)
            .with_compound(STRUCTURAL_NAMESPACE, "3064", Divider)
            .with_compound(STRUCTURAL_NAMESPACE, "3684", LeadingItem)
            .with_compound(STRUCTURAL_NAMESPACE, "3676", LeadingItem)
            .with_compound(STRUCTURAL_NAMESPACE, "3693", TrailingItem)
            .with_compound(ICONOGRAPHY_NAMESPACE, "925", Icon)
    }
}

/// Options controlling a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Component identity table.
    pub components: ComponentTable,
    /// Frames with these names are elided with their whole subtree.
    pub skipped_names: Vec<String>,
    /// Emit the navigation-state object and its environment injection.
    pub navigation_shell: bool,
    /// Register the design system fonts in the view initializer.
    pub register_fonts: bool,
    /// Maximum width applied to the view body.
    pub max_width: Option<u32>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            components: ComponentTable::default(),
            skipped_names: vec![
                "Top App Bar".to_string(),
                "Interaction State".to_string(),
                "Bottom App Bar".to_string(),
            ],
            navigation_shell: true,
            register_fonts: true,
            max_width: Some(600),
        }
    }
}

impl CodegenConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        self.skipped_names.iter().any(|skipped| skipped == name)
    }
}
