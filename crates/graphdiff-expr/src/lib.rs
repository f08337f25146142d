//! Mapping expressions
//!
//! Typed input model for update-graph mappings.
//!
//! # Core Concepts
//!
//! - [`Expression`]: lambda / call / member-access tree declaring a mapping
//! - [`MemberAccessor`]: object-safe reflected member with checked get/set
//! - [`Property`]: accessor bound to a concrete owner and value type
//! - [`TypeTag`]: declared type of parameters and members
//!
//! # Example
//!
//! ```rust,ignore
//! use graphdiff_expr::{Expression, ParameterExpr, Property, TypeTag};
//! use std::sync::Arc;
//!
//! let orders = Arc::new(Property::<Customer, Vec<Order>>::new(
//!     "Orders",
//!     |c| &c.orders,
//!     |c, v| c.orders = v,
//! ));
//! let map = ParameterExpr::new("map", TypeTag::of::<Customer>());
//! let mapping = Expression::lambda(
//!     map.clone(),
//!     Expression::call(
//!         "OwnedCollection",
//!         vec![Expression::Parameter(map), Expression::selector("p", orders)],
//!     ),
//! );
//! assert_eq!(mapping.to_string(), "map => map.OwnedCollection(p => p.Orders)");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod accessor;
mod expression;
mod types;

pub use accessor::{AccessorError, MemberAccessor, Property};
pub use expression::{CallExpr, Expression, LambdaExpr, MemberExpr, ParameterExpr};
pub use types::TypeTag;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
