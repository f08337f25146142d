//! Fluent mapping builder
//!
//! Produces the same expression shape the public configuration API does:
//!
//! ```rust,ignore
//! let mapping = MappingBuilder::new::<Customer>()
//!     .owned_collection_with(customer_orders(), |with| {
//!         with.associated_entity(order_items())
//!     })
//!     .build();
//! // map => map.OwnedCollection(p => p.Orders, with => with.AssociatedEntity(p => p.Items))
//! ```

use graphdiff_expr::{Expression, MemberAccessor, ParameterExpr, TypeTag};
use std::any::Any;
use std::sync::Arc;

/// Chains marker calls onto a configuration parameter
#[derive(Debug, Clone)]
pub struct MappingBuilder {
    parameter: ParameterExpr,
    chain: Expression,
}

impl MappingBuilder {
    /// Mapping rooted at `T`, parameter named `map`
    #[must_use]
    pub fn new<T: Any>() -> Self {
        Self::for_type("map", TypeTag::of::<T>())
    }

    #[must_use]
    pub fn for_type(parameter_name: &str, ty: TypeTag) -> Self {
        let parameter = ParameterExpr::new(parameter_name, ty);
        Self {
            chain: Expression::Parameter(parameter.clone()),
            parameter,
        }
    }

    #[must_use]
    pub fn owned_entity(self, member: Arc<dyn MemberAccessor>) -> Self {
        self.mark("OwnedEntity", member)
    }

    #[must_use]
    pub fn associated_entity(self, member: Arc<dyn MemberAccessor>) -> Self {
        self.mark("AssociatedEntity", member)
    }

    #[must_use]
    pub fn owned_collection(self, member: Arc<dyn MemberAccessor>) -> Self {
        self.mark("OwnedCollection", member)
    }

    #[must_use]
    pub fn associated_collection(self, member: Arc<dyn MemberAccessor>) -> Self {
        self.mark("AssociatedCollection", member)
    }

    #[must_use]
    pub fn owned_entity_with(
        self,
        member: Arc<dyn MemberAccessor>,
        nested: impl FnOnce(Self) -> Self,
    ) -> Self {
        self.mark_with("OwnedEntity", member, nested)
    }

    #[must_use]
    pub fn owned_collection_with(
        self,
        member: Arc<dyn MemberAccessor>,
        nested: impl FnOnce(Self) -> Self,
    ) -> Self {
        self.mark_with("OwnedCollection", member, nested)
    }

    #[must_use]
    pub fn associated_entity_with(
        self,
        member: Arc<dyn MemberAccessor>,
        nested: impl FnOnce(Self) -> Self,
    ) -> Self {
        self.mark_with("AssociatedEntity", member, nested)
    }

    #[must_use]
    pub fn associated_collection_with(
        self,
        member: Arc<dyn MemberAccessor>,
        nested: impl FnOnce(Self) -> Self,
    ) -> Self {
        self.mark_with("AssociatedCollection", member, nested)
    }

    /// Append `method(p => p.member)`; `method` is not checked
    #[must_use]
    pub fn mark(self, method: &str, member: Arc<dyn MemberAccessor>) -> Self {
        self.push_call(method, member, None)
    }

    /// Append `method(p => p.member, with => ...)`; `method` is not checked
    #[must_use]
    pub fn mark_with(
        self,
        method: &str,
        member: Arc<dyn MemberAccessor>,
        nested: impl FnOnce(Self) -> Self,
    ) -> Self {
        let inner = nested(Self::for_type("with", member.value_type())).build();
        self.push_call(method, member, Some(inner))
    }

    fn push_call(
        mut self,
        method: &str,
        member: Arc<dyn MemberAccessor>,
        nested: Option<Expression>,
    ) -> Self {
        let mut arguments = vec![self.chain, Expression::selector("p", member)];
        arguments.extend(nested);
        self.chain = Expression::call(method, arguments);
        self
    }

    /// Close the chain into `parameter => chain`
    #[must_use]
    pub fn build(self) -> Expression {
        Expression::lambda(self.parameter, self.chain)
    }
}
