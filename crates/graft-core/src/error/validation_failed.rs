use super::Error;

/// Aggregate of two or more validation errors.
///
/// Validation walks the entire configured universe of type maps and reports
/// every problem in one pass, so a caller does not have to re-run validation
/// once per defect. A single validation error is raised directly instead of
/// being wrapped, keeping one-error messages simple to read and match on.
#[derive(Debug)]
pub(super) struct ValidationFailed {
    errors: Vec<Error>,
}

impl std::error::Error for ValidationFailed {}

impl core::fmt::Display for ValidationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "mapping configuration is invalid ({} errors)",
            self.errors.len()
        )?;
        for err in &self.errors {
            write!(f, "\n  - {}", err)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a validation error from the accumulated per-map errors.
    ///
    /// Exactly one error is returned unwrapped; two or more are aggregated.
    /// Must not be called with an empty list.
    pub fn validation_failed(mut errors: Vec<Error>) -> Error {
        assert!(!errors.is_empty(), "validation_failed requires errors");
        if errors.len() == 1 {
            return errors.remove(0);
        }
        Error::from(super::ErrorKind::ValidationFailed(ValidationFailed {
            errors,
        }))
    }

    /// Returns `true` if this error aggregates multiple validation errors.
    pub fn is_validation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ValidationFailed(_))
    }

    /// Returns the aggregated validation errors.
    ///
    /// Empty unless this is a validation aggregate; a single validation
    /// error is raised directly and keeps its own kind.
    pub fn validation_errors(&self) -> &[Error] {
        match self.kind() {
            super::ErrorKind::ValidationFailed(err) => &err.errors,
            _ => &[],
        }
    }
}
