//! Resolved mapping plans.
//!
//! A [`TypeMap`] is the sealed engine's unit of output: the ordered member
//! mappings, constructor plan, hooks, and flags a downstream plan compiler
//! consumes. Plans are built by the sealing pipeline and never mutated
//! afterwards.

mod binding;
pub use binding::SourceBinding;

mod ctor_map;
pub use ctor_map::{ConstructorMap, CtorParamMap};

mod member_map;
pub use member_map::{MemberMapping, PathMapping};

mod type_map;
pub use type_map::TypeMap;

/// Uniquely identifies a plan within a sealed configuration.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TypeMapId(pub usize);

/// Which side's member list shape validation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberList {
    /// Every writable destination member must be mapped
    #[default]
    Destination,
    /// Every readable source field must be consumed
    Source,
    /// Skip shape validation for the map
    None,
}

impl std::fmt::Debug for TypeMapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeMapId({})", self.0)
    }
}
