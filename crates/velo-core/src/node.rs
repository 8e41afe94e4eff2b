//! The design-tree node model.
//!
//! Field names follow the design tool's plugin API so that a JSON export of a
//! selection can be deserialized directly (with the `serde` feature).

use crate::types::{NodeId, Padding, Rgb, StyleId, VariableId};
use indexmap::IndexMap;
use std::fmt;

/// The type of a node.
///
/// The translator understands a closed set of node types; anything else the
/// design tool produces is kept as [`NodeKind::Other`] so it can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum NodeKind {
    Frame,
    Instance,
    Group,
    Text,
    Rectangle,
    Ellipse,
    Vector,
    Line,
    Other(String),
}

impl NodeKind {
    /// The design tool's name for this node type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Frame => "FRAME",
            Self::Instance => "INSTANCE",
            Self::Group => "GROUP",
            Self::Text => "TEXT",
            Self::Rectangle => "RECTANGLE",
            Self::Ellipse => "ELLIPSE",
            Self::Vector => "VECTOR",
            Self::Line => "LINE",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        match name {
            "FRAME" => Self::Frame,
            "INSTANCE" => Self::Instance,
            "GROUP" => Self::Group,
            "TEXT" => Self::Text,
            "RECTANGLE" => Self::Rectangle,
            "ELLIPSE" => Self::Ellipse,
            "VECTOR" => Self::Vector,
            "LINE" => Self::Line,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for NodeKind {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auto-layout direction of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// Distribution of children along the primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum AxisDistribution {
    #[default]
    Min,
    Center,
    Max,
    SpaceBetween,
}

/// How a child aligns on its parent's counter axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum LayoutAlign {
    #[default]
    Inherit,
    Stretch,
    Min,
    Center,
    Max,
}

/// Resizing constraint of a node outside auto-layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ConstraintType {
    #[default]
    Min,
    Center,
    Max,
    Stretch,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    pub horizontal: ConstraintType,
    pub vertical: ConstraintType,
}

/// Horizontal alignment of a text node's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

/// Layout attributes of a node.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct LayoutProps {
    pub layout_mode: LayoutMode,
    pub item_spacing: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub primary_axis_align_items: AxisDistribution,
    pub layout_align: LayoutAlign,
    pub constraints: Option<Constraints>,
    pub corner_radius: Option<f64>,
}

impl LayoutProps {
    pub fn padding(&self) -> Padding {
        Padding {
            top: self.padding_top,
            right: self.padding_right,
            bottom: self.padding_bottom,
            left: self.padding_left,
        }
    }
}

/// Type of a paint in a node's fill list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    #[cfg_attr(feature = "serde", serde(other))]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paint {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: PaintKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<Rgb>,
}

impl Paint {
    pub fn solid(color: Rgb) -> Self {
        Self {
            kind: PaintKind::Solid,
            color: Some(color),
        }
    }
}

/// Attributes only meaningful on text nodes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct TextProps {
    pub characters: String,
    pub opacity: f64,
    pub text_style_id: Option<StyleId>,
    pub text_align_horizontal: TextAlign,
    /// Variable the first fill is bound to.
    pub bound_fill_variable: Option<VariableId>,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            characters: String::new(),
            opacity: 1.0,
            text_style_id: None,
            text_align_horizontal: TextAlign::Left,
            bound_fill_variable: None,
        }
    }
}

/// Type of a component property exposed by an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum PropertyKind {
    Boolean,
    Text,
    InstanceSwap,
    Variant,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(untagged))]
pub enum PropertyValue {
    Bool(bool),
    String(String),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// A component property of an instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentProperty {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: PropertyKind,
    pub value: PropertyValue,
}

/// A node of the design tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Node {
    pub id: NodeId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: NodeKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<Node>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub layout: LayoutProps,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fills: Vec<Paint>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fill_style_id: Option<StyleId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub corner_style_id: Option<StyleId>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub text: TextProps,
    /// Properties of an instance, keyed as the design tool reports them
    /// (`"Icon Left#12:3"`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub component_properties: IndexMap<String, ComponentProperty>,
}

impl Node {
    /// Create a node with default attributes.
    pub fn new(kind: NodeKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            kind,
            name: name.into(),
            children: Vec::new(),
            layout: LayoutProps::default(),
            fills: Vec::new(),
            fill_style_id: None,
            corner_style_id: None,
            text: TextProps::default(),
            component_properties: IndexMap::new(),
        }
    }

    pub fn frame(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Frame, id, name)
    }

    pub fn instance(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Instance, id, name)
    }

    pub fn group(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Group, id, name)
    }

    /// Create a text node with the given content.
    pub fn text(id: impl Into<String>, name: impl Into<String>, characters: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Text, id, name);
        node.text.characters = characters.into();
        node
    }

    /// Add a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout.layout_mode = mode;
        self
    }

    pub fn with_item_spacing(mut self, spacing: f64) -> Self {
        self.layout.item_spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.layout.padding_left = padding.left;
        self.layout.padding_right = padding.right;
        self.layout.padding_top = padding.top;
        self.layout.padding_bottom = padding.bottom;
        self
    }

    pub fn with_distribution(mut self, distribution: AxisDistribution) -> Self {
        self.layout.primary_axis_align_items = distribution;
        self
    }

    pub fn with_layout_align(mut self, align: LayoutAlign) -> Self {
        self.layout.layout_align = align;
        self
    }

    pub fn with_horizontal_constraint(mut self, constraint: ConstraintType) -> Self {
        let mut constraints = self.layout.constraints.unwrap_or_default();
        constraints.horizontal = constraint;
        self.layout.constraints = Some(constraints);
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.layout.corner_radius = Some(radius);
        self
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fills.push(paint);
        self
    }

    pub fn with_fill_style(mut self, style: StyleId) -> Self {
        self.fill_style_id = Some(style);
        self
    }

    pub fn with_corner_style(mut self, style: StyleId) -> Self {
        self.corner_style_id = Some(style);
        self
    }

    pub fn with_text_style(mut self, style: StyleId) -> Self {
        self.text.text_style_id = Some(style);
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text.text_align_horizontal = align;
        self
    }

    pub fn with_bound_fill(mut self, variable: VariableId) -> Self {
        self.text.bound_fill_variable = Some(variable);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.text.opacity = opacity;
        self
    }

    /// Add a component property.
    pub fn with_property(mut self, key: impl Into<String>, kind: PropertyKind, value: PropertyValue) -> Self {
        self.component_properties
            .insert(key.into(), ComponentProperty { kind, value });
        self
    }

    pub fn is_frame(&self) -> bool {
        self.kind == NodeKind::Frame
    }

    /// Index of the direct child with the given id.
    pub fn child_index(&self, id: &NodeId) -> Option<usize> {
        self.children.iter().position(|child| &child.id == id)
    }

    /// First descendant (depth-first, pre-order, excluding `self`) matching
    /// the predicate.
    pub fn find_descendant(&self, predicate: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        for child in &self.children {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(predicate) {
                return Some(found);
            }
        }
        None
    }

    /// Content of the first descendant text node named `slot`.
    pub fn slot_text(&self, slot: &str) -> Option<&str> {
        self.find_descendant(&|n: &Node| n.kind == NodeKind::Text && n.name == slot)
            .map(|n| n.text.characters.as_str())
    }

    /// The first component property whose key starts with `prefix`.
    pub fn property_starting_with(&self, prefix: &str) -> Option<(&str, &ComponentProperty)> {
        self.component_properties
            .iter()
            .find(|(key, _)| key.starts_with(prefix))
            .map(|(key, prop)| (key.as_str(), prop))
    }

    /// The first component property whose key contains `fragment`.
    pub fn property_containing(&self, fragment: &str) -> Option<(&str, &ComponentProperty)> {
        self.component_properties
            .iter()
            .find(|(key, _)| key.contains(fragment))
            .map(|(key, prop)| (key.as_str(), prop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_names() {
        assert_eq!(NodeKind::from("FRAME"), NodeKind::Frame);
        assert_eq!(NodeKind::from("LINE"), NodeKind::Line);
        assert_eq!(NodeKind::from("STAR"), NodeKind::Other("STAR".to_string()));
        assert_eq!(NodeKind::Other("STAR".to_string()).to_string(), "STAR");
        assert_eq!(NodeKind::Instance.as_str(), "INSTANCE");
    }

    #[test]
    fn test_slot_text_searches_nested_children() {
        let node = Node::instance("1:1", "Button").with_child(
            Node::frame("1:2", "Content").with_child(Node::text("1:3", "Button", "Submit")),
        );

        assert_eq!(node.slot_text("Button"), Some("Submit"));
        assert_eq!(node.slot_text("Label"), None);
    }

    #[test]
    fn test_slot_text_ignores_non_text_nodes() {
        let node = Node::instance("1:1", "Badge")
            .with_child(Node::frame("1:2", "Badge label"))
            .with_child(Node::text("1:3", "Badge label", "New"));

        assert_eq!(node.slot_text("Badge label"), Some("New"));
    }

    #[test]
    fn test_property_lookup_by_prefix() {
        let node = Node::instance("1:1", "Field")
            .with_property("Icon Left#12:0", PropertyKind::Boolean, PropertyValue::Bool(true))
            .with_property("Icon-Left#12:1", PropertyKind::InstanceSwap, PropertyValue::String("104:925".into()));

        let (key, prop) = node.property_starting_with("Icon Left").unwrap();
        assert_eq!(key, "Icon Left#12:0");
        assert_eq!(prop.value.as_bool(), Some(true));

        let (_, swap) = node.property_containing("Icon-Left").unwrap();
        assert_eq!(swap.kind, PropertyKind::InstanceSwap);
        assert!(node.property_starting_with("Icon Right").is_none());
    }

    #[test]
    fn test_child_index() {
        let frame = Node::frame("1", "Row")
            .with_child(Node::text("2", "a", "A"))
            .with_child(Node::text("3", "b", "B"));

        assert_eq!(frame.child_index(&NodeId::new("3")), Some(1));
        assert_eq!(frame.child_index(&NodeId::new("9")), None);
    }
}
