use crate::ty::{TypePair, TypeSpace};

/// A runtime mapping strategy that handles pairs outside the configured
/// plans.
///
/// Strategies are consulted by the validation dry run when a pair has no
/// resolved plan: the first strategy whose [`is_match`] returns `true`
/// claims the pair. Container-like strategies report the element pair they
/// would map through [`associated_types`] so the dry run can keep walking.
///
/// [`is_match`]: ObjectMapper::is_match
/// [`associated_types`]: ObjectMapper::associated_types
pub trait ObjectMapper: Send + Sync {
    /// Returns `true` when this strategy can map the pair.
    fn is_match(&self, space: &TypeSpace, pair: TypePair) -> bool;

    /// Returns the element pair this strategy delegates to, if any.
    fn associated_types(&self, _space: &TypeSpace, _pair: TypePair) -> Option<TypePair> {
        None
    }
}

/// Matches any pair whose destination is assignable from the source.
///
/// Registered as the last strategy by default so identity and
/// widening-style leaf pairs validate without further configuration.
#[derive(Debug, Default)]
pub struct AssignableMapper;

impl ObjectMapper for AssignableMapper {
    fn is_match(&self, space: &TypeSpace, pair: TypePair) -> bool {
        space.is_assignable(pair.destination, pair.source)
    }
}
