//! Classification of component instances into widget kinds.

use crate::config::{ComponentKind, ComponentTable};
use crate::snapshot::ResolvedNode;
use velo_core::Node;

/// Instance-name fragment that marks a list row, regardless of identity.
pub const LIST_MARKER: &str = "List";

/// Classify an instance.
///
/// A name containing "List" wins over the identity table. Instances whose
/// main component is unresolved, or whose id is malformed, are containers.
pub fn classify(instance: &ResolvedNode, table: &ComponentTable) -> ComponentKind {
    if instance.name().contains(LIST_MARKER) {
        return ComponentKind::ListRow;
    }
    match instance.identity() {
        Some(identity) => table.lookup(&identity),
        None => ComponentKind::Container,
    }
}

/// Option labels of a segmented control, left to right.
///
/// Each option is the text of the first descendant text node named `Button`
/// in the corresponding child; children without one contribute an empty
/// option. Duplicates are kept.
pub fn segment_options(control: &Node) -> Vec<String> {
    control
        .children
        .iter()
        .map(|segment| segment.slot_text("Button").unwrap_or_default().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use velo_core::ComponentRef;

    fn instance_of<'a>(node: &'a Node, component_id: &str) -> ResolvedNode<'a> {
        let mut resolved = ResolvedNode::bare(node);
        resolved.component = Some(ComponentRef::new(component_id, "Main"));
        resolved
    }

    #[test]
    fn test_list_name_takes_precedence() {
        let node = Node::instance("1", "List Item / Default");
        let resolved = instance_of(&node, "159:1");
        assert_eq!(classify(&resolved, &ComponentTable::default()), ComponentKind::ListRow);
    }

    #[test]
    fn test_identity_lookup() {
        let node = Node::instance("1", "Primary");
        let resolved = instance_of(&node, "159:12");
        assert_eq!(classify(&resolved, &ComponentTable::default()), ComponentKind::Button);
    }

    #[test]
    fn test_unresolved_identity_is_container() {
        let node = Node::instance("1", "Orphan");
        assert_eq!(
            classify(&ResolvedNode::bare(&node), &ComponentTable::default()),
            ComponentKind::Container
        );

        let malformed = instance_of(&node, "no-colon");
        assert_eq!(classify(&malformed, &ComponentTable::default()), ComponentKind::Container);
    }

    #[test]
    fn test_segment_options_keep_order_and_duplicates() {
        let control = Node::instance("1", "Segmented")
            .with_child(Node::instance("a", "Segment").with_child(Node::text("a1", "Button", "Day")))
            .with_child(Node::instance("b", "Segment").with_child(Node::text("b1", "Button", "Week")))
            .with_child(Node::instance("c", "Segment").with_child(Node::text("c1", "Button", "Day")))
            .with_child(Node::instance("d", "Segment"));

        assert_eq!(segment_options(&control), ["Day", "Week", "Day", ""]);
    }
}
