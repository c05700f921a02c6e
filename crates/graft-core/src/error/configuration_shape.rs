use super::Error;

/// Error when a sealed mapping plan has an invalid shape.
///
/// This occurs when:
/// - Destination (or source, depending on the configured member list) members
///   have no corresponding member mapping and are not ignored
/// - The destination type requires construction but no constructor could be
///   resolved
///
/// One error is recorded per offending type map, carrying every unmapped
/// member name, so a caller can fix the whole map in one pass.
#[derive(Debug)]
pub(super) struct ConfigurationShape {
    source_type: Box<str>,
    destination_type: Box<str>,
    unmapped: Vec<String>,
    constructor_resolved: bool,
}

impl std::error::Error for ConfigurationShape {}

impl core::fmt::Display for ConfigurationShape {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "incomplete mapping for `{}` -> `{}`",
            self.source_type, self.destination_type
        )?;
        if !self.unmapped.is_empty() {
            write!(f, ": unmapped members: {}", self.unmapped.join(", "))?;
        }
        if !self.constructor_resolved {
            f.write_str(": no constructor could be resolved")?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a configuration shape error for one type map.
    ///
    /// `unmapped` lists the offending member names; `constructor_resolved`
    /// is false when construction is required but unresolvable.
    pub fn configuration_shape(
        source_type: impl Into<String>,
        destination_type: impl Into<String>,
        unmapped: Vec<String>,
        constructor_resolved: bool,
    ) -> Error {
        Error::from(super::ErrorKind::ConfigurationShape(ConfigurationShape {
            source_type: source_type.into().into(),
            destination_type: destination_type.into().into(),
            unmapped,
            constructor_resolved,
        }))
    }

    /// Returns `true` if this error is a configuration shape error.
    pub fn is_configuration_shape(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ConfigurationShape(_))
    }

    /// Returns the unmapped member names if this is a configuration shape
    /// error.
    pub fn unmapped_members(&self) -> &[String] {
        match self.kind() {
            super::ErrorKind::ConfigurationShape(err) => &err.unmapped,
            _ => &[],
        }
    }
}
