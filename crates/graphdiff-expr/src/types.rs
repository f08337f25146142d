//! Runtime type descriptors
//!
//! Provides [`TypeTag`], the declared type of a member or parameter as seen
//! by the mapping layer.

use std::any::{Any, TypeId};
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Declared type of an expression node
///
/// Pairs the [`TypeId`] used for checked downcasts with the type name used
/// in diagnostics. Equality and hashing only consider the [`TypeId`].
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag for `T`
    #[inline]
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Underlying type id
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped
    ///
    /// # Examples
    /// - `alloc::vec::Vec<app::Order>` → `Vec<Order>`
    /// - `app::model::Customer` → `Customer`
    #[must_use]
    pub fn short_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut segment = String::new();
        for c in self.name.chars() {
            if c.is_alphanumeric() || c == '_' || c == ':' {
                segment.push(c);
            } else {
                out.push_str(segment.rsplit("::").next().unwrap_or_default());
                segment.clear();
                out.push(c);
            }
        }
        out.push_str(segment.rsplit("::").next().unwrap_or_default());
        out
    }

    /// Check whether this tag describes `T`
    #[inline]
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod model {
        pub struct Order;
    }

    #[test]
    fn tag_equality_by_type() {
        assert_eq!(TypeTag::of::<String>(), TypeTag::of::<String>());
        assert_ne!(TypeTag::of::<String>(), TypeTag::of::<u32>());
        assert!(TypeTag::of::<u32>().is::<u32>());
        assert!(!TypeTag::of::<u32>().is::<u64>());
    }

    #[test]
    fn short_name_strips_paths() {
        let tag = TypeTag::of::<model::Order>();
        assert_eq!(tag.short_name(), "Order");

        let tag = TypeTag::of::<Vec<model::Order>>();
        assert_eq!(tag.short_name(), "Vec<Order>");
        assert_eq!(tag.to_string(), "Vec<Order>");
    }

    #[test]
    fn primitive_short_name() {
        assert_eq!(TypeTag::of::<u8>().short_name(), "u8");
    }
}
