//! Include-path collection
//!
//! Flattens an [`UpdateTree`] into the dotted paths a data-loading layer
//! needs to eagerly load every leaf relationship. Interior nodes contribute
//! nothing of their own since loading a leaf path loads its ancestors too.

use crate::config::{EmptyTreePolicy, MappingConfig};
use crate::node::UpdateNode;
use crate::path::IncludePath;
use crate::tree::UpdateTree;
use serde::{Deserialize, Serialize};

/// Collects leaf include-paths from ownership trees
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeCollector {
    empty_tree: EmptyTreePolicy,
}

impl IncludeCollector {
    /// Create collector with an empty-tree policy
    #[inline]
    #[must_use]
    pub fn new(empty_tree: EmptyTreePolicy) -> Self {
        Self { empty_tree }
    }

    /// Create collector from shared configuration
    #[inline]
    #[must_use]
    pub fn from_config(config: &MappingConfig) -> Self {
        Self::new(config.empty_tree)
    }

    /// One path per leaf, depth-first in declaration order
    #[must_use]
    pub fn collect(&self, tree: &UpdateTree) -> IncludePaths {
        let empty_tree = tree.is_empty();
        let mut paths = Vec::with_capacity(tree.node_count());
        if !(empty_tree && self.empty_tree == EmptyTreePolicy::Skip) {
            collect_leaves(tree, tree.root(), &mut paths);
        }
        tracing::trace!(count = paths.len(), empty_tree, "collected include paths");
        IncludePaths { paths, empty_tree }
    }
}

fn collect_leaves(tree: &UpdateTree, node: &UpdateNode, out: &mut Vec<IncludePath>) {
    if node.is_leaf() {
        out.push(node.include_path().clone());
        return;
    }
    for child in tree.children(node.id()) {
        collect_leaves(tree, child, out);
    }
}

/// Collect with [`EmptyTreePolicy::EmitRootPath`]
///
/// A tree with no mapped members yields a single empty path.
#[must_use]
pub fn collect_include_paths(tree: &UpdateTree) -> IncludePaths {
    IncludeCollector::default().collect(tree)
}

/// Ordered include-paths of one tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncludePaths {
    paths: Vec<IncludePath>,
    #[serde(skip)]
    empty_tree: bool,
}

impl IncludePaths {
    /// Source tree had no mapped members
    #[inline]
    #[must_use]
    pub fn is_empty_tree(&self) -> bool {
        self.empty_tree
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, IncludePath> {
        self.paths.iter()
    }

    /// Paths that name at least one member
    pub fn non_empty(&self) -> impl Iterator<Item = &IncludePath> + '_ {
        self.paths.iter().filter(|path| !path.is_root())
    }

    /// Paths rendered as dot-joined strings
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.paths.iter().map(ToString::to_string).collect()
    }
}

impl IntoIterator for IncludePaths {
    type Item = IncludePath;
    type IntoIter = std::vec::IntoIter<IncludePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a IncludePaths {
    type Item = &'a IncludePath;
    type IntoIter = std::slice::Iter<'a, IncludePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::MemberKind;
    use crate::node::NodeId;
    use graphdiff_expr::{MemberAccessor, Property, TypeTag};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct Entity {
        link: u32,
    }

    fn member(name: &str) -> Arc<dyn MemberAccessor> {
        Arc::new(Property::<Entity, u32>::new(name, |e| &e.link, |e, v| e.link = v))
    }

    fn empty_tree() -> UpdateTree {
        UpdateTree::new(TypeTag::of::<Entity>())
    }

    #[test]
    fn empty_tree_emits_root_path_by_default() {
        let paths = collect_include_paths(&empty_tree());
        assert!(paths.is_empty_tree());
        assert_eq!(paths.to_strings(), vec![String::new()]);
        assert_eq!(paths.non_empty().count(), 0);
    }

    #[test]
    fn empty_tree_skip_policy_emits_nothing() {
        let paths = IncludeCollector::new(EmptyTreePolicy::Skip).collect(&empty_tree());
        assert!(paths.is_empty_tree());
        assert!(paths.is_empty());
    }

    #[test]
    fn only_leaves_contribute() {
        let mut tree = empty_tree();
        let orders = tree
            .push_child(NodeId::ROOT, member("Orders"), MemberKind::OwnedCollection)
            .unwrap();
        tree.push_child(orders, member("Items"), MemberKind::AssociatedEntity).unwrap();
        tree.push_child(orders, member("Shipment"), MemberKind::OwnedEntity).unwrap();
        tree.push_child(NodeId::ROOT, member("Address"), MemberKind::AssociatedEntity)
            .unwrap();

        let paths = collect_include_paths(&tree);
        assert!(!paths.is_empty_tree());
        assert_eq!(
            paths.to_strings(),
            vec!["Orders.Items", "Orders.Shipment", "Address"]
        );
        assert_eq!(paths.len(), tree.leaf_count());
    }

    #[test]
    fn skip_policy_does_not_affect_populated_trees() {
        let mut tree = empty_tree();
        tree.push_child(NodeId::ROOT, member("Address"), MemberKind::OwnedEntity).unwrap();
        let paths = IncludeCollector::from_config(
            &MappingConfig::new().with_empty_tree(EmptyTreePolicy::Skip),
        )
        .collect(&tree);
        assert_eq!(paths.to_strings(), vec!["Address"]);
    }

    #[test]
    fn serializes_as_string_list() {
        let mut tree = empty_tree();
        let orders = tree
            .push_child(NodeId::ROOT, member("Orders"), MemberKind::OwnedCollection)
            .unwrap();
        tree.push_child(orders, member("Items"), MemberKind::AssociatedEntity).unwrap();
        let json = serde_json::to_string(&collect_include_paths(&tree)).unwrap();
        assert_eq!(json, r#"["Orders.Items"]"#);
    }
}
