//! Ownership tree nodes
//!
//! [`UpdateNode`] is one mapped member of the object graph: which member it
//! is, how it participates in updates, and where it sits in the tree.

use crate::kind::MemberKind;
use crate::path::{IncludePath, PathError};
use graphdiff_expr::{AccessorError, MemberAccessor, TypeTag};
use smallvec::SmallVec;
use std::any::Any;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Index of a node within its [`UpdateTree`](crate::UpdateTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The tree root
    pub const ROOT: Self = Self(0);

    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena index
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node of the ownership tree
///
/// # Invariants
/// - `include_path` is the parent's path extended by this node's member name
/// - `kind` is fixed at construction; `None` only on the root
/// - `children` only grows, and only while the tree is being translated
#[derive(Debug, Clone)]
pub struct UpdateNode {
    id: NodeId,
    parent: Option<NodeId>,
    accessor: Option<Arc<dyn MemberAccessor>>,
    value_type: TypeTag,
    children: SmallVec<[NodeId; 4]>,
    include_path: IncludePath,
    kind: Option<MemberKind>,
}

impl UpdateNode {
    pub(crate) fn root(value_type: TypeTag) -> Self {
        Self {
            id: NodeId::ROOT,
            parent: None,
            accessor: None,
            value_type,
            children: SmallVec::new(),
            include_path: IncludePath::root(),
            kind: None,
        }
    }

    /// Node for `accessor` under `parent`
    ///
    /// Fails if the member name is not a valid include-path segment.
    pub(crate) fn member(
        id: NodeId,
        parent: &UpdateNode,
        accessor: Arc<dyn MemberAccessor>,
        kind: MemberKind,
    ) -> Result<Self, PathError> {
        Ok(Self {
            id,
            parent: Some(parent.id),
            include_path: parent.include_path.try_child(accessor.name())?,
            value_type: accessor.value_type(),
            accessor: Some(accessor),
            children: SmallVec::new(),
            kind: Some(kind),
        })
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// Node id
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Parent node (`None` on the root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Member this node represents on its parent's type
    #[inline]
    #[must_use]
    pub fn accessor(&self) -> Option<&Arc<dyn MemberAccessor>> {
        self.accessor.as_ref()
    }

    /// Member name (`None` on the root)
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.accessor.as_deref().map(|accessor| accessor.name())
    }

    /// Declared type of the member, or the mapped entity type on the root
    #[inline]
    #[must_use]
    pub fn value_type(&self) -> TypeTag {
        self.value_type
    }

    /// Child nodes in declaration order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Path from the root to this node
    #[inline]
    #[must_use]
    pub fn include_path(&self) -> &IncludePath {
        &self.include_path
    }

    /// Include-path rendered for a data-loading layer
    #[inline]
    #[must_use]
    pub fn include_string(&self) -> String {
        self.include_path.to_string()
    }

    /// Marker this node was declared with (`None` on the root)
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Option<MemberKind> {
        self.kind
    }

    /// Cascade semantics; always `false` on the root
    #[inline]
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.kind.is_some_and(MemberKind::is_owned)
    }

    /// Multi-valued relationship; always `false` on the root
    #[inline]
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.kind.is_some_and(MemberKind::is_collection)
    }

    /// Check if this is the tree root
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// No nested member configuration
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Has nested member configuration
    #[inline]
    #[must_use]
    pub fn has_members(&self) -> bool {
        !self.children.is_empty()
    }

    /// Assign `value` to this node's member on `target`
    ///
    /// # Errors
    /// - [`AccessorError::Unbound`] on the root
    /// - [`AccessorError::TypeMismatch`] if `target` or `value` has the wrong type
    pub fn set_value(&self, target: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessorError> {
        self.accessor
            .as_ref()
            .ok_or(AccessorError::Unbound)?
            .set_value(target, value)
    }

    /// Borrow this node's member from `target`
    ///
    /// # Errors
    /// Same as [`set_value`](Self::set_value)
    pub fn get_value<'a>(&self, target: &'a dyn Any) -> Result<&'a dyn Any, AccessorError> {
        self.accessor
            .as_ref()
            .ok_or(AccessorError::Unbound)?
            .get_value(target)
    }
}
