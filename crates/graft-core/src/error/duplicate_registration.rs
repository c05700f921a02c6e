use super::Error;

/// Error when the same (source, destination) pair is registered twice.
///
/// Raised at registration time, not deferred to validation, because two
/// registrations for one pair is an unambiguous authoring mistake. The two
/// profile names are the same string when the pair was registered twice
/// within one profile.
#[derive(Debug)]
pub(super) struct DuplicateRegistration {
    source_type: Box<str>,
    destination_type: Box<str>,
    first_profile: Box<str>,
    second_profile: Box<str>,
}

impl std::error::Error for DuplicateRegistration {}

impl core::fmt::Display for DuplicateRegistration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "duplicate mapping registration for `{}` -> `{}`: declared in profile `{}` and in profile `{}`",
            self.source_type, self.destination_type, self.first_profile, self.second_profile
        )
    }
}

impl Error {
    /// Creates a duplicate registration error naming both declaring profiles.
    pub fn duplicate_registration(
        source_type: impl Into<String>,
        destination_type: impl Into<String>,
        first_profile: impl Into<String>,
        second_profile: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::DuplicateRegistration(
            DuplicateRegistration {
                source_type: source_type.into().into(),
                destination_type: destination_type.into().into(),
                first_profile: first_profile.into().into(),
                second_profile: second_profile.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a duplicate registration error.
    pub fn is_duplicate_registration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateRegistration(_))
    }
}
