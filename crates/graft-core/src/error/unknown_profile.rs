use super::Error;

/// Error when profile-scoped validation names a profile that does not exist.
#[derive(Debug)]
pub(super) struct UnknownProfile {
    name: Box<str>,
}

impl std::error::Error for UnknownProfile {}

impl core::fmt::Display for UnknownProfile {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no profile named `{}`", self.name)
    }
}

impl Error {
    /// Creates an unknown profile error.
    pub fn unknown_profile(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownProfile(UnknownProfile {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown profile error.
    pub fn is_unknown_profile(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownProfile(_))
    }
}
