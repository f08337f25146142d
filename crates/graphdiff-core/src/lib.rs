//! Update-graph mapping
//!
//! Turns a declarative mapping of owned and associated members into the
//! ownership tree a graph-update engine walks, and into the include-paths a
//! data-loading layer eagerly loads.
//!
//! # Core Concepts
//!
//! - [`MemberKind`]: the four marker operations (owned/associated × entity/collection)
//! - [`UpdateTree`] / [`UpdateNode`]: arena tree of mapped members
//! - [`IncludePath`]: dot-joined member chain from the root
//! - [`Translator`]: expression → tree
//! - [`IncludeCollector`]: tree → leaf include-paths
//!
//! # Example
//!
//! ```rust,ignore
//! use graphdiff_core::{collect_include_paths, translate};
//!
//! // map => map.OwnedCollection(p => p.Orders, with => with.AssociatedEntity(p => p.Items))
//! let tree = translate(&mapping)?;
//! let orders = tree.find("Orders").unwrap();
//! assert!(orders.is_owned() && orders.is_collection());
//!
//! let paths = collect_include_paths(&tree);
//! assert_eq!(paths.to_strings(), vec!["Orders.Items"]);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod config;
mod error;
mod include;
mod kind;
mod node;
mod path;
mod translate;
mod tree;

pub use config::{EmptyTreePolicy, MappingConfig};
pub use error::{ConfigError, MappingError, MappingResult};
pub use include::{collect_include_paths, IncludeCollector, IncludePaths};
pub use kind::MemberKind;
pub use node::{NodeId, UpdateNode};
pub use path::{IncludePath, PathError};
pub use translate::{translate, Translator};
pub use tree::{Ancestors, DepthFirst, NodeSummary, UpdateTree};

pub use graphdiff_expr::{AccessorError, Expression, MemberAccessor, TypeTag};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
