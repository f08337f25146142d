//! Marker operations
//!
//! Provides [`MemberKind`], the four ways a mapping can mark a member.

use crate::error::MappingError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// How a mapped member participates in graph updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    /// Single related entity updated together with its parent
    OwnedEntity,
    /// Single related entity kept as a reference only
    AssociatedEntity,
    /// Related collection updated together with its parent
    OwnedCollection,
    /// Related collection kept as references only
    AssociatedCollection,
}

impl MemberKind {
    /// All kinds, in declaration order
    pub const ALL: [Self; 4] = [
        Self::OwnedEntity,
        Self::AssociatedEntity,
        Self::OwnedCollection,
        Self::AssociatedCollection,
    ];

    /// Cascade semantics
    #[inline]
    #[must_use]
    pub fn is_owned(self) -> bool {
        matches!(self, Self::OwnedEntity | Self::OwnedCollection)
    }

    /// Multi-valued relationship
    #[inline]
    #[must_use]
    pub fn is_collection(self) -> bool {
        matches!(self, Self::OwnedCollection | Self::AssociatedCollection)
    }

    /// Marker method name used in mapping expressions
    #[inline]
    #[must_use]
    pub fn method_name(self) -> &'static str {
        match self {
            Self::OwnedEntity => "OwnedEntity",
            Self::AssociatedEntity => "AssociatedEntity",
            Self::OwnedCollection => "OwnedCollection",
            Self::AssociatedCollection => "AssociatedCollection",
        }
    }
}

impl Display for MemberKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

impl FromStr for MemberKind {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.method_name() == s)
            .ok_or_else(|| MappingError::unsupported(s))
    }
}
