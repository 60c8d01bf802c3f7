use super::{connect, Db};
use crate::{driver::Driver, Result};

/// Rows fetched per statement by lazy value iteration unless a table says
/// otherwise.
const DEFAULT_ITER_BATCH_SIZE: usize = 500;

pub struct Builder {
    iter_batch_size: usize,
}

impl Builder {
    /// Sets the default number of rows lazy iteration fetches per statement
    /// for tables opened on this database.
    pub fn iter_batch_size(&mut self, size: usize) -> &mut Self {
        self.iter_batch_size = size.max(1);
        self
    }

    /// Connects using the driver selected by the URL scheme.
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        let driver = connect::driver(url)?;
        self.build_boxed(driver).await
    }

    /// Connects using an explicitly provided driver.
    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        self.build_boxed(Box::new(driver)).await
    }

    async fn build_boxed(&mut self, driver: Box<dyn Driver>) -> Result<Db> {
        let connection = driver.connect().await?;
        tracing::debug!(url = %driver.url(), "connected");

        Ok(Db::new(driver, connection, self.iter_batch_size))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            iter_batch_size: DEFAULT_ITER_BATCH_SIZE,
        }
    }
}
