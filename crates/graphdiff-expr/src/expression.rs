//! Declarative mapping expressions
//!
//! A mapping is declared as a lambda over a configuration parameter whose
//! body chains marker calls, each selecting a member and optionally carrying
//! a nested configuration for it:
//!
//! ```text
//! map => map.OwnedCollection(p => p.Orders, with => with.AssociatedEntity(p => p.Items))
//! ```
//!
//! [`Expression`] models that tree. Calls keep their receiver as argument 0,
//! so a chain `a.X(..).Y(..)` is `Call(Y, [Call(X, [a, ..]), ..])`.

use crate::accessor::MemberAccessor;
use crate::types::TypeTag;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Node of a mapping expression tree
#[derive(Debug, Clone)]
pub enum Expression {
    /// Lambda parameter reference
    Parameter(ParameterExpr),

    /// Member access on an object expression
    Member(MemberExpr),

    /// Method call; argument 0 is the receiver
    Call(CallExpr),

    /// Single-parameter lambda
    Lambda(LambdaExpr),
}

impl Expression {
    /// Parameter reference
    #[inline]
    #[must_use]
    pub fn parameter(name: impl Into<String>, ty: TypeTag) -> Self {
        Self::Parameter(ParameterExpr::new(name, ty))
    }

    /// Member access `object.member`
    #[inline]
    #[must_use]
    pub fn member(object: Expression, member: Arc<dyn MemberAccessor>) -> Self {
        Self::Member(MemberExpr {
            object: Box::new(object),
            member,
        })
    }

    /// Method call with receiver as the first argument
    #[inline]
    #[must_use]
    pub fn call(method: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Self::Call(CallExpr {
            method: method.into(),
            arguments,
        })
    }

    /// Lambda `parameter => body`
    #[inline]
    #[must_use]
    pub fn lambda(parameter: ParameterExpr, body: Expression) -> Self {
        Self::Lambda(LambdaExpr {
            parameter,
            body: Box::new(body),
        })
    }

    /// Member selector lambda `p => p.member` over the member's owner type
    #[must_use]
    pub fn selector(parameter_name: impl Into<String>, member: Arc<dyn MemberAccessor>) -> Self {
        let parameter = ParameterExpr::new(parameter_name, member.owner_type());
        let body = Self::member(Self::Parameter(parameter.clone()), member);
        Self::lambda(parameter, body)
    }

    /// Short variant name for diagnostics
    #[inline]
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Parameter(_) => "parameter",
            Self::Member(_) => "member access",
            Self::Call(_) => "method call",
            Self::Lambda(_) => "lambda",
        }
    }
}

/// Named, typed lambda parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterExpr {
    name: String,
    ty: TypeTag,
}

impl ParameterExpr {
    /// Create parameter
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeTag) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Parameter name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    #[inline]
    #[must_use]
    pub fn ty(&self) -> TypeTag {
        self.ty
    }
}

/// Member access
#[derive(Debug, Clone)]
pub struct MemberExpr {
    object: Box<Expression>,
    member: Arc<dyn MemberAccessor>,
}

impl MemberExpr {
    /// Object the member is read from
    #[inline]
    #[must_use]
    pub fn object(&self) -> &Expression {
        &self.object
    }

    /// Accessed member
    #[inline]
    #[must_use]
    pub fn member(&self) -> &Arc<dyn MemberAccessor> {
        &self.member
    }

    /// Member name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.member.name()
    }
}

/// Method call
#[derive(Debug, Clone)]
pub struct CallExpr {
    method: String,
    arguments: Vec<Expression>,
}

impl CallExpr {
    /// Called method name
    #[inline]
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// All arguments, receiver first
    #[inline]
    #[must_use]
    pub fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    /// Receiver (argument 0)
    #[inline]
    #[must_use]
    pub fn receiver(&self) -> Option<&Expression> {
        self.arguments.first()
    }
}

/// Single-parameter lambda
#[derive(Debug, Clone)]
pub struct LambdaExpr {
    parameter: ParameterExpr,
    body: Box<Expression>,
}

impl LambdaExpr {
    /// Lambda parameter
    #[inline]
    #[must_use]
    pub fn parameter(&self) -> &ParameterExpr {
        &self.parameter
    }

    /// Lambda body
    #[inline]
    #[must_use]
    pub fn body(&self) -> &Expression {
        &self.body
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter(p) => f.write_str(&p.name),
            Self::Member(m) => write!(f, "{}.{}", m.object, m.name()),
            Self::Call(c) => {
                let (receiver, rest) = match c.arguments.split_first() {
                    Some((receiver, rest)) => (Some(receiver), rest),
                    None => (None, &[][..]),
                };
                if let Some(receiver) = receiver {
                    write!(f, "{receiver}.")?;
                }
                write!(f, "{}(", c.method)?;
                for (i, arg) in rest.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::Lambda(l) => write!(f, "{} => {}", l.parameter.name, l.body),
        }
    }
}
