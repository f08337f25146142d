//! Expression → ownership tree translation
//!
//! A marker call `receiver.Kind(selector, nested..)` selects one member of
//! the entity the receiver configures. The receiver spine is walked first so
//! siblings land in declaration order, then each selected member becomes a
//! child of the current node and every nested configuration is resolved
//! against that child. The current node is passed down explicitly.

use crate::config::MappingConfig;
use crate::error::{ConfigError, MappingError, MappingResult};
use crate::kind::MemberKind;
use crate::node::NodeId;
use crate::tree::UpdateTree;
use graphdiff_expr::{CallExpr, Expression, MemberAccessor, MemberExpr};
use std::sync::Arc;

/// Translates mapping expressions into [`UpdateTree`]s
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: MappingConfig,
}

impl Translator {
    /// Create translator with configuration
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `config` fails
    /// [`MappingConfig::validate`]
    pub fn new(config: MappingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Build the ownership tree for `expression`
    ///
    /// `expression` must be a lambda over the configuration parameter of the
    /// aggregate root; its body is a chain of marker calls, or the bare
    /// parameter for an empty mapping.
    ///
    /// # Errors
    /// - [`MappingError::UnsupportedOperation`] for a call that is not a marker
    /// - [`MappingError::MalformedExpression`] for shapes that select no member,
    ///   or a member whose name is not a valid include-path segment
    /// - [`MappingError::DepthExceeded`] beyond `max_depth` levels of nesting
    pub fn translate(&self, expression: &Expression) -> MappingResult<UpdateTree> {
        let Expression::Lambda(lambda) = expression else {
            return Err(MappingError::malformed(format!(
                "mapping must be a lambda, found {}",
                expression.kind_name()
            )));
        };

        tracing::debug!(mapping = %expression, "translating update mapping");

        let mut tree = UpdateTree::new(lambda.parameter().ty());
        self.visit(lambda.body(), NodeId::ROOT, &mut tree)?;

        tracing::debug!(
            nodes = tree.node_count(),
            leaves = tree.leaf_count(),
            "update mapping translated"
        );
        Ok(tree)
    }

    fn visit(&self, expression: &Expression, current: NodeId, tree: &mut UpdateTree) -> MappingResult<()> {
        match expression {
            Expression::Parameter(_) => Ok(()),
            Expression::Lambda(lambda) => self.visit(lambda.body(), current, tree),
            Expression::Call(call) => self.visit_chain(call, current, tree),
            Expression::Member(member) => Err(MappingError::malformed(format!(
                "member '{}' is not wrapped in a mapping call",
                member.name()
            ))),
        }
    }

    /// Resolve `call` and every call on its receiver spine against `current`
    fn visit_chain(&self, call: &CallExpr, current: NodeId, tree: &mut UpdateTree) -> MappingResult<()> {
        // Outermost first; members are appended innermost first.
        let mut chain = Vec::new();
        let mut next = call;
        let base = loop {
            let kind = marker_kind(next)?;
            let receiver = next
                .receiver()
                .ok_or_else(|| MappingError::malformed(format!("{kind} call has no receiver")))?;
            chain.push((next, kind));
            match receiver {
                Expression::Call(inner) => next = inner,
                other => break other,
            }
        };
        self.visit(base, current, tree)?;

        for (call, kind) in chain.into_iter().rev() {
            self.map_member(call, kind, current, tree)?;
        }
        Ok(())
    }

    fn map_member(
        &self,
        call: &CallExpr,
        kind: MemberKind,
        current: NodeId,
        tree: &mut UpdateTree,
    ) -> MappingResult<()> {
        let Some((selector, nested)) = call
            .arguments()
            .split_first()
            .and_then(|(_, arguments)| arguments.split_first())
        else {
            return Err(MappingError::malformed(format!("{kind} call has no member selector")));
        };
        let accessor = selected_member(selector)?;

        let depth = tree[current].include_path().depth() + 1;
        if depth > self.config.max_depth {
            return Err(MappingError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }

        let child = tree
            .push_child(current, Arc::clone(accessor), kind)
            .map_err(|err| {
                MappingError::malformed(format!(
                    "member name '{}' is not a valid include-path segment: {err}",
                    accessor.name()
                ))
            })?;
        tracing::trace!(
            path = %tree[child].include_path(),
            %kind,
            "mapped member"
        );

        for configuration in nested {
            self.visit(configuration, child, tree)?;
        }
        Ok(())
    }
}

fn marker_kind(call: &CallExpr) -> MappingResult<MemberKind> {
    call.method().parse::<MemberKind>().map_err(|err| {
        tracing::warn!(method = call.method(), "unsupported update mapping operation");
        err
    })
}

/// Member chosen by `p => p.Member` or a bare `p.Member`
fn selected_member(selector: &Expression) -> MappingResult<&Arc<dyn MemberAccessor>> {
    let body = match selector {
        Expression::Lambda(lambda) => lambda.body(),
        other => other,
    };
    match body {
        Expression::Member(member) => direct_member(member),
        other => Err(MappingError::malformed(format!(
            "member selector must be a member access, found {}",
            other.kind_name()
        ))),
    }
}

fn direct_member(member: &MemberExpr) -> MappingResult<&Arc<dyn MemberAccessor>> {
    match member.object() {
        Expression::Parameter(_) => Ok(member.member()),
        _ => Err(MappingError::malformed(format!(
            "member selector '{}' must access a member of its parameter directly",
            member.name()
        ))),
    }
}

/// Translate with the default configuration
///
/// # Errors
/// See [`Translator::translate`]
pub fn translate(expression: &Expression) -> MappingResult<UpdateTree> {
    Translator::default().translate(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::UpdateNode;
    use graphdiff_expr::{ParameterExpr, Property, TypeTag};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct Customer {
        orders: Vec<Order>,
    }

    #[derive(Debug, Default)]
    struct Order {
        items: Vec<u32>,
    }

    fn orders() -> Arc<dyn MemberAccessor> {
        Arc::new(Property::<Customer, Vec<Order>>::new(
            "Orders",
            |c| &c.orders,
            |c, v| c.orders = v,
        ))
    }

    fn items() -> Arc<dyn MemberAccessor> {
        Arc::new(Property::<Order, Vec<u32>>::new("Items", |o| &o.items, |o, v| o.items = v))
    }

    fn entity_parameter() -> ParameterExpr {
        ParameterExpr::new("map", TypeTag::of::<Customer>())
    }

    fn mapping(body: impl FnOnce(Expression) -> Expression) -> Expression {
        let map = entity_parameter();
        Expression::lambda(map.clone(), body(Expression::Parameter(map)))
    }

    #[test]
    fn bare_parameter_yields_empty_tree() {
        let tree = translate(&mapping(|map| map)).unwrap();
        assert!(tree.is_empty());
        assert!(tree.root().value_type().is::<Customer>());
    }

    #[test]
    fn nested_collection_mapping() {
        let expr = mapping(|map| {
            let with = ParameterExpr::new("with", TypeTag::of::<Vec<Order>>());
            let nested = Expression::lambda(
                with.clone(),
                Expression::call(
                    "AssociatedEntity",
                    vec![Expression::Parameter(with), Expression::selector("p", items())],
                ),
            );
            Expression::call(
                "OwnedCollection",
                vec![map, Expression::selector("p", orders()), nested],
            )
        });

        let tree = translate(&expr).unwrap();
        let orders = tree.find("Orders").unwrap();
        assert!(orders.is_owned());
        assert!(orders.is_collection());
        let items = tree.find("Orders.Items").unwrap();
        assert_eq!(items.parent(), Some(orders.id()));
        assert!(!items.is_owned());
        assert!(!items.is_collection());
    }

    #[test]
    fn bare_member_selector_is_accepted() {
        let expr = mapping(|map| {
            let p = Expression::parameter("p", TypeTag::of::<Customer>());
            Expression::call("OwnedCollection", vec![map, Expression::member(p, orders())])
        });
        let tree = translate(&expr).unwrap();
        assert_eq!(tree.root().children().len(), 1);
    }

    #[test]
    fn unsupported_method_aborts() {
        let expr = mapping(|map| Expression::call("DeleteEntity", vec![map, Expression::selector("p", orders())]));
        let err = translate(&expr).unwrap_err();
        assert_eq!(err, MappingError::unsupported("DeleteEntity"));
    }

    #[test]
    fn unsupported_method_in_receiver_chain_aborts() {
        let expr = mapping(|map| {
            let inner = Expression::call("Detach", vec![map]);
            Expression::call("OwnedEntity", vec![inner, Expression::selector("p", orders())])
        });
        assert!(matches!(
            translate(&expr),
            Err(MappingError::UnsupportedOperation { method }) if method == "Detach"
        ));
    }

    #[test]
    fn non_lambda_mapping_is_malformed() {
        let err = translate(&Expression::parameter("map", TypeTag::of::<Customer>())).unwrap_err();
        assert!(matches!(err, MappingError::MalformedExpression(_)));
    }

    #[test]
    fn call_without_selector_is_malformed() {
        let expr = mapping(|map| Expression::call("OwnedEntity", vec![map]));
        assert!(matches!(translate(&expr), Err(MappingError::MalformedExpression(_))));
    }

    #[test]
    fn call_without_receiver_is_malformed() {
        let expr = mapping(|_| Expression::call("OwnedEntity", Vec::new()));
        assert!(matches!(translate(&expr), Err(MappingError::MalformedExpression(_))));
    }

    #[test]
    fn chained_member_selector_is_malformed() {
        let expr = mapping(|map| {
            let p = Expression::parameter("p", TypeTag::of::<Customer>());
            let chained = Expression::member(Expression::member(p, orders()), items());
            Expression::call("OwnedEntity", vec![map, chained])
        });
        assert!(matches!(translate(&expr), Err(MappingError::MalformedExpression(_))));
    }

    #[test]
    fn dangling_member_is_malformed() {
        let expr = mapping(|map| Expression::member(map, orders()));
        assert!(matches!(translate(&expr), Err(MappingError::MalformedExpression(_))));
    }

    #[test]
    fn depth_limit_is_enforced() {
        let expr = mapping(|map| {
            let with = ParameterExpr::new("with", TypeTag::of::<Vec<Order>>());
            let nested = Expression::lambda(
                with.clone(),
                Expression::call(
                    "OwnedEntity",
                    vec![Expression::Parameter(with), Expression::selector("p", items())],
                ),
            );
            Expression::call("OwnedCollection", vec![map, Expression::selector("p", orders()), nested])
        });

        let shallow = Translator::new(MappingConfig::new().with_max_depth(1)).unwrap();
        assert_eq!(
            shallow.translate(&expr).unwrap_err(),
            MappingError::DepthExceeded { limit: 1 }
        );

        let deep_enough = Translator::new(MappingConfig::new().with_max_depth(2)).unwrap();
        assert_eq!(deep_enough.translate(&expr).unwrap().node_count(), 3);
    }

    #[test]
    fn zero_depth_config_is_rejected() {
        let err = Translator::new(MappingConfig::new().with_max_depth(0)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn member_names_must_be_path_segments() {
        for name in ["Line-Items", "A.B", ""] {
            let member: Arc<dyn MemberAccessor> = Arc::new(Property::<Customer, Vec<Order>>::new(
                name,
                |c| &c.orders,
                |c, v| c.orders = v,
            ));
            let expr = mapping(|map| {
                Expression::call("OwnedEntity", vec![map, Expression::selector("p", member)])
            });
            let err = translate(&expr).unwrap_err();
            assert!(
                matches!(&err, MappingError::MalformedExpression(msg) if msg.contains(&format!("'{name}'"))),
                "{name:?}: {err}"
            );
        }
    }

    #[test]
    fn long_sibling_chain_translates() {
        const SIBLINGS: usize = 5_000;
        let expr = mapping(|map| {
            (0..SIBLINGS).fold(map, |receiver, _| {
                Expression::call("OwnedEntity", vec![receiver, Expression::selector("p", orders())])
            })
        });

        let tree = translate(&expr).unwrap();
        assert_eq!(tree.root().children().len(), SIBLINGS);
        assert_eq!(tree.node_count(), SIBLINGS + 1);
        assert!(tree.children(NodeId::ROOT).all(|node| node.include_string() == "Orders"));
    }

    #[test]
    fn siblings_keep_declaration_order() {
        let expr = mapping(|map| {
            let first = Expression::call("OwnedCollection", vec![map, Expression::selector("p", orders())]);
            let p = Expression::parameter("p", TypeTag::of::<Order>());
            Expression::call("AssociatedEntity", vec![first, Expression::member(p, items())])
        });
        let tree = translate(&expr).unwrap();
        let kinds: Vec<_> = tree.children(NodeId::ROOT).filter_map(UpdateNode::kind).collect();
        assert_eq!(kinds, vec![MemberKind::OwnedCollection, MemberKind::AssociatedEntity]);
    }
}
