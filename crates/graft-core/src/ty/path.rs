use super::{MemberId, TypeId, TypeSpace};

/// Ordered chain of member accesses rooted at a source type.
///
/// An empty path denotes the source object itself.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct MemberPath {
    segments: Vec<MemberId>,
}

impl MemberPath {
    pub fn new() -> MemberPath {
        MemberPath::default()
    }

    pub fn from_segments(segments: Vec<MemberId>) -> MemberPath {
        MemberPath { segments }
    }

    pub fn single(member: MemberId) -> MemberPath {
        MemberPath {
            segments: vec![member],
        }
    }

    pub fn push(&mut self, member: MemberId) {
        self.segments.push(member);
    }

    pub fn pop(&mut self) -> Option<MemberId> {
        self.segments.pop()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[MemberId] {
        &self.segments
    }

    /// First member access, if any
    pub fn root(&self) -> Option<MemberId> {
        self.segments.first().copied()
    }

    /// Last member access, if any
    pub fn leaf(&self) -> Option<MemberId> {
        self.segments.last().copied()
    }

    /// Type produced by walking the whole path; `fallback` when empty
    pub fn leaf_ty(&self, space: &TypeSpace, fallback: TypeId) -> TypeId {
        match self.leaf() {
            Some(member) => space.member(member).ty,
            None => fallback,
        }
    }

    /// Returns true if any segment is a method or extension access
    pub fn contains_method(&self, space: &TypeSpace) -> bool {
        self.segments
            .iter()
            .any(|&member| space.member(member).kind.is_method())
    }

    /// A new path that walks `prefix` first, then `self`
    pub fn prefixed_with(&self, prefix: &MemberPath) -> MemberPath {
        let mut segments = prefix.segments.clone();
        segments.extend_from_slice(&self.segments);
        MemberPath { segments }
    }

    pub fn describe(&self, space: &TypeSpace) -> String {
        self.segments
            .iter()
            .map(|&member| space.member(member).name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl From<MemberId> for MemberPath {
    fn from(member: MemberId) -> MemberPath {
        MemberPath::single(member)
    }
}

impl std::fmt::Debug for MemberPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MemberPath").field(&self.segments).finish()
    }
}
