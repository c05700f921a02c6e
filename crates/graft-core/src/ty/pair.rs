use super::{TypeId, TypeSpace};

/// Source and destination type of one mapping
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePair {
    pub source: TypeId,
    pub destination: TypeId,
}

impl TypePair {
    pub fn new(source: TypeId, destination: TypeId) -> TypePair {
        TypePair {
            source,
            destination,
        }
    }

    /// The pair with source and destination exchanged
    pub fn swap(self) -> TypePair {
        TypePair {
            source: self.destination,
            destination: self.source,
        }
    }

    /// Returns true if both sides of `self` derive from (or equal) the
    /// corresponding side of `base`, and at least one side differs
    pub fn is_derived_from(self, base: TypePair, space: &TypeSpace) -> bool {
        self != base
            && space.is_assignable(base.source, self.source)
            && space.is_assignable(base.destination, self.destination)
    }

    /// All pairs this request could be satisfied by, destination-major: for
    /// each destination in the destination's inheritance closure, every source
    /// in the source's closure. The pair itself comes first.
    pub fn related_pairs(self, space: &TypeSpace) -> Vec<TypePair> {
        let sources = space.inheritance_closure(self.source);
        space
            .inheritance_closure(self.destination)
            .into_iter()
            .flat_map(|destination| {
                sources
                    .iter()
                    .map(move |&source| TypePair::new(source, destination))
            })
            .collect()
    }

    pub fn describe(self, space: &TypeSpace) -> String {
        format!("{} -> {}", space.name(self.source), space.name(self.destination))
    }
}

impl std::fmt::Debug for TypePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypePair({:?}, {:?})", self.source, self.destination)
    }
}
