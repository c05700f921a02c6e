use super::Error;

/// Error when configuration names a member that does not exist.
///
/// Raised immediately at authoring time (`for_member`, `for_path`,
/// `for_source_member`, ...), not deferred to validation, so the bad name is
/// reported at the call that introduced it.
#[derive(Debug)]
pub(super) struct MissingMember {
    ty: Box<str>,
    member: Box<str>,
}

impl std::error::Error for MissingMember {}

impl core::fmt::Display for MissingMember {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "type `{}` does not have a member named `{}`",
            self.ty, self.member
        )
    }
}

impl Error {
    /// Creates a missing member error.
    pub fn missing_member(ty: impl Into<String>, member: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingMember(MissingMember {
            ty: ty.into().into(),
            member: member.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing member error.
    pub fn is_missing_member(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingMember(_))
    }
}
