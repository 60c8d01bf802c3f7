use crate::{driver::Driver, Error, Result};

use url::Url;

/// Selects a driver for the connection URL.
///
/// Schemes of stores without a driver in this build fail with a driver
/// unavailable error so callers can skip what depends on them.
pub(super) fn driver(url: &str) -> Result<Box<dyn Driver>> {
    let parsed = Url::parse(url)
        .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

    match parsed.scheme() {
        "sqlite" => connect_sqlite(url),
        scheme @ ("mysql" | "postgres" | "postgresql") => Err(Error::driver_unavailable(format!(
            "no `{scheme}` driver in this build; url={url}"
        ))),
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Driver>> {
    let driver = sqltable_driver_sqlite::Sqlite::new(url)?;
    Ok(Box::new(driver))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Driver>> {
    Err(Error::driver_unavailable("`sqlite` feature not enabled"))
}
