mod descriptor;
pub use descriptor::{
    ConstructorDescriptor, CtorId, MemberDescriptor, MemberKind, ParameterDescriptor,
    TypeDescriptor, TypeKind,
};

mod details;
pub use details::TypeDetails;
pub(crate) use details::possible_names;

mod pair;
pub use pair::TypePair;

mod path;
pub use path::MemberPath;

mod space;
pub use space::TypeSpace;

/// Uniquely identifies a type within a [`TypeSpace`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub usize);

/// Identifies one member of one type: the owning type plus the member's
/// index within its descriptor.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct MemberId {
    pub owner: TypeId,
    pub index: usize,
}

impl std::fmt::Debug for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

impl std::fmt::Debug for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "MemberId({}, {})", self.owner.0, self.index)
    }
}
