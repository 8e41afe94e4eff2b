//! Resolution of a node tree into a lookup-free snapshot.
//!
//! Every external reference a subtree needs (component identities, shared
//! styles, bound variables, instance-swap targets) is answered here, before
//! any layout or style decision runs. The rest of the crate only sees
//! [`ResolvedNode`]s and never awaits.

use crate::error::Result;
use futures::future::{join_all, LocalBoxFuture};
use futures::FutureExt;
use indexmap::IndexMap;
use velo_core::{
    ComponentIdentity, ComponentRef, DesignSource, Node, NodeKind, PropertyKind, StyleId,
};

/// A node together with the answers to all of its external lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode<'a> {
    pub node: &'a Node,
    /// Main component of an instance.
    pub component: Option<ComponentRef>,
    /// Name of the shared fill style.
    pub fill_style: Option<String>,
    /// Name of the shared corner style.
    pub corner_style: Option<String>,
    /// Name of the shared text style.
    pub text_style: Option<String>,
    /// Name of the variable the text fill is bound to.
    pub fill_variable: Option<String>,
    /// Instance-swap property key -> name of the swapped-in component.
    pub swaps: IndexMap<String, String>,
    pub children: Vec<ResolvedNode<'a>>,
}

impl<'a> ResolvedNode<'a> {
    /// A snapshot with no resolved references.
    pub fn bare(node: &'a Node) -> Self {
        Self {
            node,
            component: None,
            fill_style: None,
            corner_style: None,
            text_style: None,
            fill_variable: None,
            swaps: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &'a str {
        &self.node.name
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.node.kind
    }

    /// Identity of the main component, when resolved and well formed.
    pub fn identity(&self) -> Option<ComponentIdentity> {
        self.component.as_ref().and_then(ComponentRef::identity)
    }

    /// Name of the component swapped in by the first instance-swap property
    /// whose key starts with `prefix`.
    pub fn swap_starting_with(&self, prefix: &str) -> Option<&str> {
        self.swaps
            .iter()
            .find(|(key, _)| key.starts_with(prefix))
            .map(|(_, name)| name.as_str())
    }

    /// Like [`swap_starting_with`](Self::swap_starting_with), matching
    /// anywhere in the key.
    pub fn swap_containing(&self, fragment: &str) -> Option<&str> {
        self.swaps
            .iter()
            .find(|(key, _)| key.contains(fragment))
            .map(|(_, name)| name.as_str())
    }

    /// Visit this snapshot and all descendants, depth-first.
    pub fn walk(&self, visit: &mut dyn FnMut(&ResolvedNode<'a>)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Resolve every external reference in the tree rooted at `root`.
///
/// Children of frames are resolved strictly in document order. Children of
/// groups do not influence each other and are resolved concurrently. An
/// instance is a leaf of the snapshot: its fragment reads slots from the raw
/// node, so nothing below it is looked up. A lookup that returns `None` leaves the field empty; a
/// lookup that fails aborts the resolution.
pub async fn resolve<'a, S: DesignSource>(source: &S, root: &'a Node) -> Result<ResolvedNode<'a>> {
    resolve_node(source, root).await
}

fn resolve_node<'f, 'a: 'f, S: DesignSource>(
    source: &'f S,
    node: &'a Node,
) -> LocalBoxFuture<'f, Result<ResolvedNode<'a>>> {
    async move {
        let mut resolved = ResolvedNode::bare(node);

        if node.kind == NodeKind::Instance {
            resolved.component = source.main_component(&node.id).await?;
            if resolved.component.is_none() {
                log::warn!("instance '{}' ({}) has no main component", node.name, node.id);
            }
            resolve_swaps(source, node, &mut resolved.swaps).await?;
        }

        resolved.fill_style = style_name(source, node.fill_style_id.as_ref()).await?;
        resolved.corner_style = style_name(source, node.corner_style_id.as_ref()).await?;
        resolved.text_style = style_name(source, node.text.text_style_id.as_ref()).await?;

        if let Some(variable) = &node.text.bound_fill_variable {
            resolved.fill_variable = source.variable(variable).await?.map(|v| v.name);
            if resolved.fill_variable.is_none() {
                log::warn!("variable '{}' bound on '{}' is unresolved", variable, node.name);
            }
        }

        resolved.children = match node.kind {
            NodeKind::Instance => Vec::new(),
            NodeKind::Group => {
                join_all(node.children.iter().map(|child| resolve_node(source, child)))
                    .await
                    .into_iter()
                    .collect::<Result<Vec<_>>>()?
            }
            _ => {
                let mut children = Vec::with_capacity(node.children.len());
                for child in &node.children {
                    children.push(resolve_node(source, child).await?);
                }
                children
            }
        };

        Ok(resolved)
    }
    .boxed_local()
}

async fn style_name<S: DesignSource>(source: &S, id: Option<&StyleId>) -> Result<Option<String>> {
    let Some(id) = id else {
        return Ok(None);
    };
    let style = source.style(id).await?;
    if style.is_none() {
        log::warn!("style '{}' is unresolved", id);
    }
    Ok(style.map(|s| s.name))
}

async fn resolve_swaps<S: DesignSource>(
    source: &S,
    node: &Node,
    swaps: &mut IndexMap<String, String>,
) -> Result<()> {
    for (key, prop) in &node.component_properties {
        if prop.kind != PropertyKind::InstanceSwap {
            continue;
        }
        let Some(id) = prop.value.as_str() else {
            continue;
        };
        match source.component(id).await? {
            Some(component) => {
                swaps.insert(key.clone(), component.name);
            }
            None => log::warn!("swap target '{}' of '{}' is unresolved", id, node.name),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use velo_core::{
        InMemorySource, LookupKind, NodeId, PropertyValue, SourceError, Style, StyleId, Variable,
        VariableId,
    };

    struct FailingVariables;

    impl DesignSource for FailingVariables {
        async fn main_component(&self, _: &NodeId) -> std::result::Result<Option<ComponentRef>, SourceError> {
            Ok(None)
        }

        async fn component(&self, _: &str) -> std::result::Result<Option<ComponentRef>, SourceError> {
            Ok(None)
        }

        async fn style(&self, _: &StyleId) -> std::result::Result<Option<Style>, SourceError> {
            Ok(None)
        }

        async fn variable(&self, id: &VariableId) -> std::result::Result<Option<Variable>, SourceError> {
            Err(SourceError::lookup(LookupKind::Variable, id.to_string(), "connection reset"))
        }
    }

    fn source() -> InMemorySource {
        InMemorySource::new()
            .with_instance("2", "159:4")
            .with_component("104:925", "Arrow Right")
            .with_style("S:fill", "Surface/Primary 100")
            .with_style("S:text", "Text/Regular")
            .with_variable("V:1", "Text/Neutral 9")
    }

    #[test]
    fn test_resolves_styles_and_variables() {
        let root = Node::frame("1", "Screen")
            .with_fill_style(StyleId::new("S:fill"))
            .with_child(
                Node::text("3", "Title", "Hi")
                    .with_text_style(StyleId::new("S:text"))
                    .with_bound_fill(VariableId::new("V:1")),
            );

        let resolved = block_on(resolve(&source(), &root)).unwrap();
        assert_eq!(resolved.fill_style.as_deref(), Some("Surface/Primary 100"));
        assert_eq!(resolved.children[0].text_style.as_deref(), Some("Text/Regular"));
        assert_eq!(resolved.children[0].fill_variable.as_deref(), Some("Text/Neutral 9"));
    }

    #[test]
    fn test_resolves_instances_and_swaps() {
        let root = Node::instance("2", "Button").with_property(
            "Icon-Left#1:2",
            PropertyKind::InstanceSwap,
            PropertyValue::String("104:925".into()),
        );

        let resolved = block_on(resolve(&source(), &root)).unwrap();
        assert_eq!(resolved.identity(), Some(ComponentIdentity::new("159", "4")));
        assert_eq!(resolved.swap_starting_with("Icon-Left"), Some("Arrow Right"));
    }

    #[test]
    fn test_missing_references_stay_empty() {
        let root = Node::instance("9", "Orphan")
            .with_fill_style(StyleId::new("S:missing"))
            .with_property("Icon#1", PropertyKind::InstanceSwap, PropertyValue::String("0:0".into()));

        let resolved = block_on(resolve(&source(), &root)).unwrap();
        assert!(resolved.component.is_none());
        assert!(resolved.fill_style.is_none());
        assert!(resolved.swaps.is_empty());
    }

    #[test]
    fn test_group_children_keep_document_order() {
        let root = Node::group("1", "Cluster")
            .with_child(Node::text("a", "A", "a"))
            .with_child(Node::text("b", "B", "b"))
            .with_child(Node::text("c", "C", "c"));

        let resolved = block_on(resolve(&source(), &root)).unwrap();
        let names: Vec<&str> = resolved.children.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_lookup_failure_aborts() {
        let root = Node::frame("1", "Screen").with_child(
            Node::text("2", "Title", "Hi").with_bound_fill(VariableId::new("V:1")),
        );

        let result = block_on(resolve(&FailingVariables, &root));
        assert!(result.is_err());
    }

    #[test]
    fn test_instance_contents_are_not_looked_up() {
        let root = Node::frame("1", "Screen").with_child(
            Node::instance("2", "Button").with_child(
                Node::text("3", "Label", "Go").with_bound_fill(VariableId::new("V:1")),
            ),
        );

        let resolved = block_on(resolve(&FailingVariables, &root)).unwrap();
        assert_eq!(resolved.children.len(), 1);
        assert!(resolved.children[0].children.is_empty());
    }

    #[test]
    fn test_walk_visits_every_node() {
        let root = Node::frame("1", "Screen")
            .with_child(Node::frame("2", "Row").with_child(Node::text("3", "T", "t")));

        let resolved = block_on(resolve(&source(), &root)).unwrap();
        let mut count = 0;
        resolved.walk(&mut |_| count += 1);
        assert_eq!(count, 3);
    }
}
