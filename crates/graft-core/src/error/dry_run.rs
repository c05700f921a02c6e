use super::Error;

/// Error when the validation dry run cannot resolve a nested type pair.
///
/// This occurs when a member's (source value type, destination value type)
/// pair has no registered type map and no object-mapper strategy accepts it.
/// The enclosing type map and member name locate the offending declaration.
#[derive(Debug)]
pub(super) struct DryRunResolution {
    source_type: Box<str>,
    destination_type: Box<str>,
    owner_source_type: Box<str>,
    owner_destination_type: Box<str>,
    member: Box<str>,
}

impl std::error::Error for DryRunResolution {}

impl core::fmt::Display for DryRunResolution {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "no mapping found for `{}` -> `{}`: required by member `{}` of `{}` -> `{}`",
            self.source_type,
            self.destination_type,
            self.member,
            self.owner_source_type,
            self.owner_destination_type
        )
    }
}

impl Error {
    /// Creates a dry-run resolution error.
    ///
    /// `(source_type, destination_type)` is the unresolvable pair; the owner
    /// pair and member name identify where it was required.
    pub fn dry_run_resolution(
        source_type: impl Into<String>,
        destination_type: impl Into<String>,
        owner_source_type: impl Into<String>,
        owner_destination_type: impl Into<String>,
        member: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::DryRunResolution(DryRunResolution {
            source_type: source_type.into().into(),
            destination_type: destination_type.into().into(),
            owner_source_type: owner_source_type.into().into(),
            owner_destination_type: owner_destination_type.into().into(),
            member: member.into().into(),
        }))
    }

    /// Returns `true` if this error is a dry-run resolution error.
    pub fn is_dry_run_resolution(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DryRunResolution(_))
    }
}
