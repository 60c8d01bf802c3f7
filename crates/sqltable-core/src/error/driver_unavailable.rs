use super::Error;

/// Error when the database driver named by a connection URL is not available
/// in this build.
///
/// Drivers are compiled in through cargo features. Environments lacking a
/// driver see this error instead of a crash and can skip functionality that
/// depends on that store.
#[derive(Debug)]
pub(super) struct DriverUnavailable {
    message: Box<str>,
}

impl std::error::Error for DriverUnavailable {}

impl core::fmt::Display for DriverUnavailable {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "driver unavailable: {}", self.message)
    }
}

impl Error {
    /// Creates a driver unavailable error.
    pub fn driver_unavailable(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DriverUnavailable(DriverUnavailable {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a driver unavailable error.
    pub fn is_driver_unavailable(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::DriverUnavailable(_)))
    }
}
