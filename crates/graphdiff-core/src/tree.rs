//! Ownership tree
//!
//! [`UpdateTree`] owns every [`UpdateNode`] of one translated mapping in an
//! arena. Parent links are plain [`NodeId`]s, so upward traversal needs no
//! shared ownership. The tree is only grown by the translator; once handed
//! out it is read-only.

use crate::kind::MemberKind;
use crate::node::{NodeId, UpdateNode};
use crate::path::{IncludePath, PathError};
use graphdiff_expr::{MemberAccessor, TypeTag};
use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::sync::Arc;

/// Rooted tree of mapped members
#[derive(Debug, Clone)]
pub struct UpdateTree {
    nodes: Vec<UpdateNode>,
}

impl UpdateTree {
    pub(crate) fn new(root_type: TypeTag) -> Self {
        Self {
            nodes: vec![UpdateNode::root(root_type)],
        }
    }

    /// Append a member node under `parent`
    ///
    /// Nothing is appended if the member name is not a valid path segment.
    pub(crate) fn push_child(
        &mut self,
        parent: NodeId,
        accessor: Arc<dyn MemberAccessor>,
        kind: MemberKind,
    ) -> Result<NodeId, PathError> {
        let id = NodeId::new(self.nodes.len());
        let node = UpdateNode::member(id, &self.nodes[parent.index()], accessor, kind)?;
        self.nodes.push(node);
        self.nodes[parent.index()].push_child(id);
        Ok(id)
    }

    /// The root node
    #[inline]
    #[must_use]
    pub fn root(&self) -> &UpdateNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Id of the root node
    #[inline]
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Look up a node
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&UpdateNode> {
        self.nodes.get(id.index())
    }

    /// Number of nodes including the root
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no member was mapped (the root has no children)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root().is_leaf()
    }

    /// Children of `id`, in declaration order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &UpdateNode> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|node| node.children().iter())
            .filter_map(|child| self.get(*child))
    }

    /// Parent of `id`
    #[inline]
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<&UpdateNode> {
        self.get(id)?.parent().and_then(|parent| self.get(parent))
    }

    /// Nodes from the parent of `id` up to the root
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).and_then(UpdateNode::parent),
        }
    }

    /// Pre-order walk in declaration order, starting at the root
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// Nodes without nested configuration, in depth-first order
    pub fn leaves(&self) -> impl Iterator<Item = &UpdateNode> + '_ {
        self.depth_first().filter(|node| node.is_leaf())
    }

    /// Number of leaves; one include-path each
    #[inline]
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Find the node with the given include-path
    ///
    /// An empty string addresses the root.
    #[must_use]
    pub fn find(&self, include_path: &str) -> Option<&UpdateNode> {
        self.depth_first()
            .find(|node| node.include_path().to_string() == include_path)
    }

    /// Structural snapshot of the tree
    ///
    /// Two trees translated from structurally identical mappings have equal
    /// summaries.
    #[must_use]
    pub fn summary(&self) -> NodeSummary {
        self.summarize(self.root())
    }

    fn summarize(&self, node: &UpdateNode) -> NodeSummary {
        NodeSummary {
            name: node.name().map(str::to_string),
            include_path: node.include_path().clone(),
            kind: node.kind(),
            value_type: node.value_type().short_name(),
            members: self
                .children(node.id())
                .map(|child| self.summarize(child))
                .collect(),
        }
    }

    /// Pretty JSON rendering of [`summary`](Self::summary)
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.summary())
    }
}

impl Index<NodeId> for UpdateTree {
    type Output = UpdateNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

/// Serializable, accessor-free view of a subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    /// Member name (`None` on the root)
    pub name: Option<String>,
    /// Path from the root to this member
    pub include_path: IncludePath,
    /// Declared marker (`None` on the root)
    pub kind: Option<MemberKind>,
    /// Declared type, module paths stripped
    pub value_type: String,
    /// Nested members in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<NodeSummary>,
}

/// Iterator returned by [`UpdateTree::ancestors`]
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a UpdateTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a UpdateNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.get(self.next?)?;
        self.next = node.parent();
        Some(node)
    }
}

/// Iterator returned by [`UpdateTree::depth_first`]
#[derive(Debug)]
pub struct DepthFirst<'a> {
    tree: &'a UpdateTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a UpdateNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.get(self.stack.pop()?)?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
