//! Opaque handles standing in for host-language callables.
//!
//! The engine never evaluates these; it records them on the plan for a
//! downstream plan compiler and, where a result type is declared, feeds
//! that type into validation.

use crate::ty::TypeId;

/// A computed source value with a declared result type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueExpr {
    pub label: String,
    pub result: TypeId,
}

impl ValueExpr {
    pub fn new(label: impl Into<String>, result: TypeId) -> ValueExpr {
        ValueExpr {
            label: label.into(),
            result,
        }
    }
}

/// A boolean guard evaluated against the source object at map time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub label: String,
}

impl Predicate {
    pub fn new(label: impl Into<String>) -> Predicate {
        Predicate {
            label: label.into(),
        }
    }
}

/// A callback invoked before or after a map executes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    pub label: String,
}

impl Hook {
    pub fn new(label: impl Into<String>) -> Hook {
        Hook {
            label: label.into(),
        }
    }
}

/// A whole-object type converter; suppresses member mapping entirely
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterRef {
    pub label: String,
}

impl ConverterRef {
    pub fn new(label: impl Into<String>) -> ConverterRef {
        ConverterRef {
            label: label.into(),
        }
    }
}

/// A per-member value resolver; opaque to validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverRef {
    pub label: String,
}

impl ResolverRef {
    pub fn new(label: impl Into<String>) -> ResolverRef {
        ResolverRef {
            label: label.into(),
        }
    }
}

/// A constant stand-in value, e.g. a null substitute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub label: String,
}

impl Literal {
    pub fn new(label: impl Into<String>) -> Literal {
        Literal {
            label: label.into(),
        }
    }
}

/// A transformation applied to every mapped value of a given type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTransformer {
    pub value_ty: TypeId,
    pub label: String,
}

impl ValueTransformer {
    pub fn new(value_ty: TypeId, label: impl Into<String>) -> ValueTransformer {
        ValueTransformer {
            value_ty,
            label: label.into(),
        }
    }
}
