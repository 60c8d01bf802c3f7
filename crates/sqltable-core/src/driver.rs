mod capability;
pub use capability::Capability;

mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, schema::TableSchema, Result};

use std::{borrow::Cow, fmt::Debug};

/// A database driver: knows how to open connections to one kind of store.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Returns the URL this driver is connecting to.
    fn url(&self) -> Cow<'_, str>;

    /// Describes the driver's capability.
    fn capability(&self) -> &'static Capability;

    /// Creates a new connection to the database.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A live connection to a database.
///
/// Used by one logical operation at a time; callers serialize access.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Describes the connection's capability.
    fn capability(&self) -> &'static Capability;

    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;

    /// Describes the columns and primary key of a table.
    ///
    /// Fails with an invalid schema error when the table does not exist.
    async fn describe_table(&mut self, table: &str) -> Result<TableSchema>;

    /// Returns `true` if a table with the given name exists.
    async fn table_exists(&mut self, table: &str) -> Result<bool>;
}
