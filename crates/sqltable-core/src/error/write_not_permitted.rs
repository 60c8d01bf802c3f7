use super::Error;

/// Error when a mutating operation targets a read-only table.
///
/// Raised before any statement is sent to the store.
#[derive(Debug)]
pub(super) struct WriteNotPermitted {
    message: Box<str>,
}

impl std::error::Error for WriteNotPermitted {}

impl core::fmt::Display for WriteNotPermitted {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "write not permitted: {}", self.message)
    }
}

impl Error {
    /// Creates a write not permitted error.
    pub fn write_not_permitted(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::WriteNotPermitted(WriteNotPermitted {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a write not permitted error.
    pub fn is_write_not_permitted(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::WriteNotPermitted(_)))
    }
}
