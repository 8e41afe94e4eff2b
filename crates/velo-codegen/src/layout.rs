//! Layout inference: stack orientation, spacing, padding, fill behavior and
//! text position.
//!
//! Everything here is a pure function of a node, its parent and the parent's
//! children. Nothing is cached between nodes.

use crate::naming::format_number;
use smallvec::SmallVec;
use std::fmt;
use velo_core::{AxisDistribution, ConstraintType, LayoutAlign, LayoutMode, Node, TextAlign};

/// Item spacing emitted for frames whose children deliberately overlap.
pub const OVERLAP_SPACING: f64 = -50.0;

/// Exact gap values that have a spacing token.
const SPACING_TOKENS: [(f64, &str); 13] = [
    (0.0, "none"),
    (2.0, "xxxs"),
    (4.0, "xxs"),
    (8.0, "xs"),
    (10.0, "sm"),
    (12.0, "sm"),
    (16.0, "md"),
    (24.0, "lg"),
    (32.0, "xl"),
    (40.0, "xxl"),
    (48.0, "xxxl"),
    (64.0, "xxxxl"),
    (360.0, "full"),
];

/// The spacing token for an exact gap value; empty for unlisted values.
pub fn spacing_token(value: f64) -> &'static str {
    SPACING_TOKENS
        .iter()
        .find(|(gap, _)| *gap == value)
        .map(|(_, token)| *token)
        .unwrap_or("")
}

/// A quantized gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spacing {
    /// A named spacing token.
    Token(&'static str),
    /// A value without a token, emitted as-is.
    Literal(f64),
    /// Any negative gap: children overlap by a fixed amount.
    Overlap,
}

impl Spacing {
    /// Quantize a non-negative magnitude (padding, radius) to a token, or
    /// keep the raw value.
    pub fn quantize(value: f64) -> Self {
        match spacing_token(value) {
            "" => Self::Literal(value),
            token => Self::Token(token),
        }
    }

    /// Quantize an inter-child gap. Negative gaps of any magnitude overlap.
    pub fn from_gap(value: f64) -> Self {
        if value < 0.0 {
            Self::Overlap
        } else {
            Self::quantize(value)
        }
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => write!(f, ".{}", token),
            Self::Literal(value) => f.write_str(&format_number(*value)),
            Self::Overlap => f.write_str(&format_number(OVERLAP_SPACING)),
        }
    }
}

/// Orientation of an emitted stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackAxis {
    Horizontal,
    Vertical,
}

impl StackAxis {
    /// The SwiftUI container for this axis.
    pub fn container(&self) -> &'static str {
        match self {
            Self::Horizontal => "HStack",
            Self::Vertical => "VStack",
        }
    }
}

/// Horizontal position of a text node within its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPosition {
    Leading,
    Trailing,
    Center,
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leading => write!(f, "leading"),
            Self::Trailing => write!(f, "trailing"),
            Self::Center => write!(f, "center"),
        }
    }
}

/// Placement of a horizontal frame among its sibling frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAlignment {
    SpaceBetween,
    Leading,
    Trailing,
    Center,
    Unknown,
}

/// Layout decisions for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDecision {
    pub stack_axis: StackAxis,
    pub spacing: Spacing,
    pub padding: SmallVec<[String; 4]>,
    pub fills_width: bool,
    pub text_position: TextPosition,
}

impl LayoutDecision {
    /// Derive the decisions for `node` placed under `parent`.
    pub fn of(node: &Node, parent: Option<&Node>) -> Self {
        Self {
            stack_axis: stack_axis(node),
            spacing: Spacing::from_gap(node.layout.item_spacing),
            padding: padding_modifiers(node),
            fills_width: is_fill_width(node, parent),
            text_position: text_position(node, parent),
        }
    }
}

/// Horizontal for frames laid out horizontally, vertical for everything else.
pub fn stack_axis(node: &Node) -> StackAxis {
    if node.is_frame() && node.layout.layout_mode == LayoutMode::Horizontal {
        StackAxis::Horizontal
    } else {
        StackAxis::Vertical
    }
}

/// Whether a node stretches to the full available width.
///
/// An auto-layout node stretches when its alignment is explicitly STRETCH,
/// or when it inherits and its parent is STRETCH. Only the direct parent is
/// consulted: an INHERIT chain longer than one hop is not followed. Other
/// nodes stretch when their horizontal constraint is SCALE.
pub fn is_fill_width(node: &Node, parent: Option<&Node>) -> bool {
    if node.layout.layout_mode != LayoutMode::None {
        match (node.layout.layout_align, parent) {
            (LayoutAlign::Stretch, _) => return true,
            (LayoutAlign::Inherit, Some(parent)) => {
                return parent.layout.layout_align == LayoutAlign::Stretch;
            }
            _ => {}
        }
    }
    node.layout
        .constraints
        .map(|c| c.horizontal == ConstraintType::Scale)
        .unwrap_or(false)
}

/// Padding modifiers for a frame, in emission order.
pub fn padding_modifiers(node: &Node) -> SmallVec<[String; 4]> {
    let padding = node.layout.padding();
    let mut modifiers = SmallVec::new();

    if padding.is_uniform() {
        if padding.left > 0.0 {
            modifiers.push(format!(".padding({})", Spacing::quantize(padding.left)));
        }
        return modifiers;
    }

    let sides: &[(&str, f64)] = if padding.is_symmetric() {
        &[("horizontal", padding.left), ("vertical", padding.top)]
    } else {
        &[
            ("leading", padding.left),
            ("trailing", padding.right),
            ("top", padding.top),
            ("bottom", padding.bottom),
        ]
    };
    for (edge, value) in sides {
        if *value > 0.0 {
            modifiers.push(format!(".padding(.{}, {})", edge, Spacing::quantize(*value)));
        }
    }
    modifiers
}

/// Position of a text node within a horizontal stack.
///
/// The index is taken among all of the parent's children, not only text
/// siblings. Outside a horizontal stack text is leading.
pub fn text_position(node: &Node, parent: Option<&Node>) -> TextPosition {
    let Some(parent) = parent else {
        return TextPosition::Leading;
    };
    if stack_axis(parent) != StackAxis::Horizontal {
        return TextPosition::Leading;
    }

    let last = parent.children.len().saturating_sub(1);
    match parent.child_index(&node.id) {
        Some(0) => TextPosition::Leading,
        Some(index) if index == last => TextPosition::Trailing,
        _ if node.text.text_align_horizontal == TextAlign::Center => TextPosition::Center,
        _ => TextPosition::Leading,
    }
}

/// Placement of a horizontal frame, for diagnostics.
pub fn frame_alignment(frame: &Node, parent: Option<&Node>) -> FrameAlignment {
    if stack_axis(frame) != StackAxis::Horizontal {
        return FrameAlignment::Unknown;
    }
    if frame.layout.primary_axis_align_items == AxisDistribution::SpaceBetween {
        return FrameAlignment::SpaceBetween;
    }
    let Some(parent) = parent.filter(|p| stack_axis(p) == StackAxis::Horizontal) else {
        return FrameAlignment::Unknown;
    };

    let frames: Vec<&Node> = parent.children.iter().filter(|c| c.is_frame()).collect();
    match frames.iter().position(|c| c.id == frame.id) {
        Some(0) => FrameAlignment::Leading,
        Some(index) if index + 1 == frames.len() => FrameAlignment::Trailing,
        _ => FrameAlignment::Center,
    }
}

/// Whether flexible spacers go between the children of a frame.
pub fn inserts_spacers(frame: &Node, parent: Option<&Node>) -> bool {
    stack_axis(frame) == StackAxis::Horizontal
        && (is_fill_width(frame, parent)
            || frame.layout.primary_axis_align_items == AxisDistribution::SpaceBetween)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn negative_gaps_always_overlap(gap in -10_000.0f64..-0.001) {
            prop_assert_eq!(Spacing::from_gap(gap), Spacing::Overlap);
        }

        #[test]
        fn unlisted_gaps_are_literal(gap in 0u32..500) {
            let value = gap as f64;
            let listed = SPACING_TOKENS.iter().any(|(v, _)| *v == value);
            prop_assume!(!listed);
            prop_assert_eq!(spacing_token(value), "");
            prop_assert_eq!(Spacing::from_gap(value), Spacing::Literal(value));
        }
    }
}
