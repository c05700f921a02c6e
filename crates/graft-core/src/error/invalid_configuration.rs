use super::Error;

/// Error when a configuration declaration is structurally invalid.
///
/// This occurs when:
/// - A map includes itself as a derived or base pair
/// - An included or overriding pair is not actually derived from the declared
///   pair
/// - A constructor-parameter override names a parameter the resolved
///   constructor does not have
/// - An include directive references a pair with no registered map
///
/// These errors are caught while sealing, before any validation runs.
#[derive(Debug)]
pub(super) struct InvalidConfiguration {
    message: Box<str>,
}

impl std::error::Error for InvalidConfiguration {}

impl core::fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping configuration: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid configuration error.
    ///
    /// This is used for authoring mistakes caught while sealing: bad include
    /// relationships, overrides that target unrelated types, unknown
    /// constructor parameters, etc.
    pub fn invalid_configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConfiguration(
            InvalidConfiguration {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid configuration error.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConfiguration(_))
    }
}
