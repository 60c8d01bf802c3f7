use super::Error;

/// Error when a single-valued join yields more than one row for a source key.
///
/// A map view never picks one of several candidate rows; the ambiguity is
/// surfaced to the caller instead.
#[derive(Debug)]
pub(super) struct NonUniqueMapping {
    context: Option<Box<str>>,
}

impl std::error::Error for NonUniqueMapping {}

impl core::fmt::Display for NonUniqueMapping {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("non-unique mapping")?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {}", ctx)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a non-unique mapping error.
    ///
    /// The context parameter describes the source key and the number of
    /// rows the join produced.
    pub fn non_unique_mapping(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NonUniqueMapping(NonUniqueMapping {
            context: Some(context.into().into()),
        }))
    }

    /// Returns `true` if this error is a non-unique mapping error.
    pub fn is_non_unique_mapping(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::NonUniqueMapping(_)))
    }
}
