//! Recursive emission of SwiftUI code from a resolved node tree.

mod components;
mod templates;

pub use templates::TemplateEngine;

use crate::classify::{classify, segment_options};
use crate::config::{CodegenConfig, ComponentKind};
use crate::error::Result;
use crate::layout::{frame_alignment, inserts_spacers, LayoutDecision, Spacing, StackAxis};
use crate::naming::{format_number, indent, swift_string};
use crate::snapshot::ResolvedNode;
use crate::style;
use crate::view_state::ViewState;
use velo_core::NodeKind;

/// Indentation of nested fragments.
pub(crate) const INDENT: usize = 4;

/// The emitted body of a view and the state its view model must declare.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedView {
    pub view: String,
    pub state: ViewState,
}

/// Walks a resolved tree and produces the view body.
///
/// The emitter owns the [`ViewState`] of the run in progress and clears it at
/// the start of every [`emit`](Self::emit), so one emitter can serve many
/// sequential runs. Concurrent runs need their own emitters.
pub struct CodeEmitter<'c> {
    config: &'c CodegenConfig,
    state: ViewState,
}

impl<'c> CodeEmitter<'c> {
    pub fn new(config: &'c CodegenConfig) -> Self {
        Self {
            config,
            state: ViewState::new(),
        }
    }

    /// State recorded by the last emission.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Emit the view body for `root`.
    pub fn emit(&mut self, root: &ResolvedNode) -> Result<EmittedView> {
        self.state.reset();
        let view = self.emit_node(root, None)?;
        Ok(EmittedView {
            view,
            state: self.state.clone(),
        })
    }

    fn emit_node(&mut self, node: &ResolvedNode, parent: Option<&ResolvedNode>) -> Result<String> {
        log::debug!("Emitting {} '{}'", node.kind(), node.name());

        match node.kind() {
            NodeKind::Frame => self.emit_frame(node, parent),
            NodeKind::Instance => self.emit_instance(node, parent),
            NodeKind::Group => self.emit_group(node),
            NodeKind::Text => Ok(emit_text(node, parent)),
            NodeKind::Rectangle => Ok(shape("Rectangle", node)),
            NodeKind::Ellipse | NodeKind::Vector => Ok(shape("Circle", node)),
            NodeKind::Line => Ok("Separator()".to_string()),
            NodeKind::Other(kind) => {
                log::warn!("Unhandled node type {} on '{}'", kind, node.name());
                Ok(format!("// Unhandled node type: {}", kind))
            }
        }
    }

    fn emit_frame(&mut self, frame: &ResolvedNode, parent: Option<&ResolvedNode>) -> Result<String> {
        if self.config.is_skipped(frame.name()) {
            log::debug!("Skipping frame '{}'", frame.name());
            return Ok(String::new());
        }

        let is_root = parent.is_none();
        let raw_parent = parent.map(|p| p.node);
        log::debug!(
            "Frame '{}' alignment: {:?}",
            frame.name(),
            frame_alignment(frame.node, raw_parent)
        );
        let layout = LayoutDecision::of(frame.node, raw_parent);
        let spacers = inserts_spacers(frame.node, raw_parent);

        let config = self.config;
        let mut parts = Vec::with_capacity(frame.children.len());
        for child in frame.children.iter().filter(|c| !config.is_skipped(c.name())) {
            if spacers && !parts.is_empty() {
                parts.push("Spacer()".to_string());
            }
            parts.push(self.emit_node(child, Some(frame))?);
        }

        let stack = layout.stack_axis.container();
        if layout.spacing == Spacing::Overlap {
            return Ok(block(&format!("{}(spacing: {})", stack, layout.spacing), &parts));
        }

        let mut modifiers: Vec<String> = Vec::new();
        if !is_root {
            modifiers.extend(layout.padding.iter().cloned());
        }
        modifiers.push(format!(".background({})", style::color(frame)));
        if let Some(radius) = style::corner_radius(frame, parent) {
            modifiers.push(radius);
        }

        let spacing = if layout.stack_axis == StackAxis::Horizontal && layout.fills_width {
            ".zero".to_string()
        } else {
            layout.spacing.to_string()
        };
        let mut content = block(&format!("{}(spacing: {})", stack, spacing), &parts);
        if is_root {
            content = block("ScrollView", &[content]);
        }

        Ok(format!("{}\n{}", content, modifiers.join("\n")))
    }

    fn emit_instance(&mut self, instance: &ResolvedNode, parent: Option<&ResolvedNode>) -> Result<String> {
        let kind = classify(instance, &self.config.components);
        log::debug!("Instance '{}' classified as {}", instance.name(), kind);

        match kind {
            ComponentKind::ListRow => components::list_row(instance),
            ComponentKind::Button => Ok(components::button(instance, parent)),
            ComponentKind::Badge => Ok(components::badge(instance)),
            ComponentKind::SegmentedControl => {
                self.state.set_segments(segment_options(instance.node));
                Ok(components::segmented_control(instance))
            }
            ComponentKind::InputField => Ok(components::input_field(instance, &mut self.state)),
            ComponentKind::Checkbox => {
                self.state.mark_checkbox();
                Ok(components::checkbox(instance))
            }
            ComponentKind::Icon => components::icon(instance),
            ComponentKind::Image => Ok(components::image(instance)),
            ComponentKind::Divider => Ok(components::divider()),
            ComponentKind::LeadingItem | ComponentKind::TrailingItem => components::item_icon(instance),
            ComponentKind::Container => Ok(components::container(instance)),
        }
    }

    fn emit_group(&mut self, group: &ResolvedNode) -> Result<String> {
        let parts = group
            .children
            .iter()
            .map(|child| self.emit_node(child, Some(group)))
            .collect::<Result<Vec<_>>>()?;
        Ok(block(&format!("VStack(spacing: .md) /* {} */", group.name()), &parts))
    }
}

/// `opener {` + indented parts + `}`.
fn block(opener: &str, parts: &[String]) -> String {
    let body = parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    if body.is_empty() {
        format!("{} {{\n}}", opener)
    } else {
        format!("{} {{\n{}\n}}", opener, indent(&body, INDENT))
    }
}

fn emit_text(text: &ResolvedNode, parent: Option<&ResolvedNode>) -> String {
    let layout = LayoutDecision::of(text.node, parent.map(|p| p.node));
    let mut lines = vec![format!("Text({})", swift_string(&text.node.text.characters))];

    let font = style::typography(text);
    if !font.is_empty() {
        lines.push(format!(".font(.{})", font));
    }
    let color = style::bound_color_token(text);
    if !color.is_empty() {
        lines.push(format!(".foregroundColor(.{})", color));
    }
    lines.push(format!(".opacity({})", format_number(text.node.text.opacity)));
    lines.push(format!(
        ".frame(maxWidth: .infinity, alignment: .{})",
        layout.text_position
    ));
    lines.join("\n")
}

fn shape(primitive: &str, node: &ResolvedNode) -> String {
    format!("{}().fill({})", primitive, style::color(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::resolve;
    use futures::executor::block_on;
    use velo_core::{InMemorySource, LayoutMode, Node, Padding, Paint, Rgb};

    fn emit(root: &Node) -> EmittedView {
        let config = CodegenConfig::default();
        let resolved = block_on(resolve(&InMemorySource::new(), root)).unwrap();
        CodeEmitter::new(&config).emit(&resolved).unwrap()
    }

    fn nested(child: Node) -> Node {
        Node::frame("root", "Screen").with_child(child)
    }

    #[test]
    fn test_text_fragment() {
        let root = Node::text("1", "Title", "Hello").with_opacity(0.5);
        assert_eq!(
            emit(&root).view,
            "Text(\"Hello\")\n.opacity(0.5)\n.frame(maxWidth: .infinity, alignment: .leading)"
        );
    }

    #[test]
    fn test_root_frame_is_scroll_view() {
        let root = Node::frame("1", "Screen")
            .with_padding(Padding::uniform(16.0))
            .with_corner_radius(8.0)
            .with_child(Node::new(NodeKind::Line, "2", "Rule"));
        assert_eq!(
            emit(&root).view,
            "ScrollView {\n    VStack(spacing: .none) {\n        Separator()\n    }\n}\n.background(.clear)"
        );
    }

    #[test]
    fn test_nested_frame_modifiers() {
        let root = nested(
            Node::frame("1", "Card")
                .with_layout_mode(LayoutMode::Vertical)
                .with_item_spacing(8.0)
                .with_padding(Padding::uniform(16.0))
                .with_corner_radius(16.0)
                .with_fill(Paint::solid(Rgb::from_rgb8(255, 255, 255))),
        );
        assert_eq!(
            emit(&root).view,
            "ScrollView {\n    VStack(spacing: .none) {\n        VStack(spacing: .xs) {\n        }\n        \
             .padding(.md)\n        .background(Color(hex: \"#ffffff\"))\n        .cornerRadius(.md)\n    \
             }\n}\n.background(.clear)"
        );
    }

    #[test]
    fn test_skipped_root_is_empty() {
        let root = Node::frame("1", "Top App Bar").with_child(Node::text("2", "T", "x"));
        assert_eq!(emit(&root).view, "");
    }

    #[test]
    fn test_skipped_children_do_not_get_spacers() {
        let root = nested(
            Node::frame("row", "Row")
                .with_layout_mode(LayoutMode::Horizontal)
                .with_distribution(velo_core::AxisDistribution::SpaceBetween)
                .with_child(Node::frame("a", "Top App Bar"))
                .with_child(Node::new(NodeKind::Line, "b", "Rule"))
                .with_child(Node::frame("c", "Interaction State")),
        );
        let view = emit(&root).view;
        assert!(!view.contains("Spacer()"));
        assert!(view.contains("Separator()"));
    }

    #[test]
    fn test_shapes_and_placeholders() {
        let root = Node::group("g", "Decor")
            .with_child(Node::new(NodeKind::Rectangle, "1", "Box"))
            .with_child(Node::new(NodeKind::Vector, "2", "Blob"))
            .with_child(Node::new(NodeKind::Other("STAR".into()), "3", "Star"));
        assert_eq!(
            emit(&root).view,
            "VStack(spacing: .md) /* Decor */ {\n    Rectangle().fill(.clear)\n    \
             Circle().fill(.clear)\n    // Unhandled node type: STAR\n}"
        );
    }
}
