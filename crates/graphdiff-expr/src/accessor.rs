//! Member accessors
//!
//! [`MemberAccessor`] is the object-safe view of a mapped member the rest of
//! the workspace works with. [`Property`] binds it to a concrete owner and
//! value type at construction, so writing a value back is a checked downcast
//! rather than a runtime cast.

use crate::types::TypeTag;
use std::any::Any;
use std::fmt::{self, Debug, Formatter};

/// A named member on an owner type
///
/// # Contract
/// - `get_value` and `set_value` must fail with
///   [`AccessorError::TypeMismatch`] when the target is not an
///   instance of `owner_type()` or the value is not a `value_type()`
/// - `name` is stable and used verbatim in include-paths
pub trait MemberAccessor: Send + Sync + Debug {
    /// Member name as it appears in include-paths
    fn name(&self) -> &str;

    /// Type declaring this member
    fn owner_type(&self) -> TypeTag;

    /// Declared type of the member
    fn value_type(&self) -> TypeTag;

    /// Borrow the member's current value from `target`
    ///
    /// # Errors
    /// Returns [`AccessorError::TypeMismatch`] if `target` is not an owner instance
    fn get_value<'a>(&self, target: &'a dyn Any) -> Result<&'a dyn Any, AccessorError>;

    /// Assign `value` to the member on `target`
    ///
    /// # Errors
    /// Returns [`AccessorError::TypeMismatch`] if `target` is not an owner
    /// instance or `value` is not of the member's declared type
    fn set_value(&self, target: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessorError>;
}

/// Accessor for a member of type `V` on owner `E`
pub struct Property<E, V> {
    name: String,
    get: fn(&E) -> &V,
    set: fn(&mut E, V),
}

impl<E, V> Property<E, V> {
    /// Bind a named member to its getter and setter
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, get: fn(&E) -> &V, set: fn(&mut E, V)) -> Self {
        Self {
            name: name.into(),
            get,
            set,
        }
    }
}

impl<E, V> Clone for Property<E, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            get: self.get,
            set: self.set,
        }
    }
}

impl<E: Any, V: Any> Debug for Property<E, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("owner", &TypeTag::of::<E>().short_name())
            .field("value", &TypeTag::of::<V>().short_name())
            .finish()
    }
}

impl<E: Any, V: Any> Property<E, V> {
    fn mismatch<T: Any>(&self) -> AccessorError {
        AccessorError::TypeMismatch {
            member: self.name.clone(),
            expected: std::any::type_name::<T>(),
        }
    }
}

impl<E, V> MemberAccessor for Property<E, V>
where
    E: Any + Send + Sync,
    V: Any + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn owner_type(&self) -> TypeTag {
        TypeTag::of::<E>()
    }

    fn value_type(&self) -> TypeTag {
        TypeTag::of::<V>()
    }

    fn get_value<'a>(&self, target: &'a dyn Any) -> Result<&'a dyn Any, AccessorError> {
        let owner = target
            .downcast_ref::<E>()
            .ok_or_else(|| self.mismatch::<E>())?;
        Ok((self.get)(owner))
    }

    fn set_value(&self, target: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessorError> {
        // Check the value first so a mismatch leaves the target untouched.
        let value = value.downcast::<V>().map_err(|_| self.mismatch::<V>())?;
        let owner = target
            .downcast_mut::<E>()
            .ok_or_else(|| self.mismatch::<E>())?;
        (self.set)(owner, *value);
        Ok(())
    }
}

/// Errors raised when reading or writing a member
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessorError {
    /// Target or value has the wrong concrete type
    #[error("type mismatch on member '{member}': expected {expected}")]
    TypeMismatch {
        member: String,
        expected: &'static str,
    },

    /// Node carries no accessor (the tree root)
    #[error("node is not bound to a member")]
    Unbound,
}
