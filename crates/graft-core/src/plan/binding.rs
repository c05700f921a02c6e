use crate::expr::{ConverterRef, ResolverRef, ValueExpr};
use crate::ty::{MemberPath, TypeId, TypeSpace};

/// Where a destination member's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceBinding {
    /// Path discovered by convention matching
    Auto(MemberPath),
    /// Path configured explicitly
    Path(MemberPath),
    /// Computed by a host expression with a declared result type
    Expr(ValueExpr),
    /// The whole source object
    Identity,
    /// Produced by an opaque value resolver
    Resolver(ResolverRef),
    /// Produced by an opaque value converter
    Converter(ConverterRef),
}

impl SourceBinding {
    pub fn path(&self) -> Option<&MemberPath> {
        match self {
            SourceBinding::Auto(path) | SourceBinding::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, SourceBinding::Auto(_))
    }

    /// Opaque bindings cannot be followed by validation
    pub fn is_opaque(&self) -> bool {
        matches!(self, SourceBinding::Resolver(_) | SourceBinding::Converter(_))
    }

    /// The value type the binding produces, when statically known.
    /// An empty path binds the source object itself.
    pub fn result_ty(&self, space: &TypeSpace, source: TypeId) -> Option<TypeId> {
        match self {
            SourceBinding::Auto(path) | SourceBinding::Path(path) => {
                Some(path.leaf_ty(space, source))
            }
            SourceBinding::Expr(expr) => Some(expr.result),
            SourceBinding::Identity => Some(source),
            SourceBinding::Resolver(_) | SourceBinding::Converter(_) => None,
        }
    }
}
