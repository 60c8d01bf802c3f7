mod builder;
mod connect;

pub use builder::Builder;

use crate::{
    driver::{
        operation::{ExecSql, Insert, QuerySql, Transaction},
        Capability, Connection, Driver, Operation, Response,
    },
    Result,
};

use sqltable_core::{schema::TableSchema, Value, ValueRecord};
use tokio::sync::Mutex;

use std::sync::Arc;

/// Placeholder expanded to the dialect's auto-increment keyword in setup DDL.
const AUTO_INCREMENT: &str = "{AUTO_INCREMENT}";

/// Shared state between all `Db` clones.
struct Shared {
    driver: Box<dyn Driver>,

    /// The single live connection. Held for one statement at a time.
    connection: Mutex<Box<dyn Connection>>,

    default_iter_batch_size: usize,
}

/// A database handle owning one live connection.
///
/// Cloning is cheap and yields a handle to the same connection, so any number
/// of tables may share it. Statements are serialized: each operation holds
/// the connection only while its statement runs. The connection closes when
/// the last clone is dropped.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Connects to the database named by `url`, e.g. `sqlite::memory:`.
    pub async fn connect(url: &str) -> Result<Db> {
        Builder::default().connect(url).await
    }

    pub(crate) fn new(
        driver: Box<dyn Driver>,
        connection: Box<dyn Connection>,
        default_iter_batch_size: usize,
    ) -> Db {
        Db {
            shared: Arc::new(Shared {
                driver,
                connection: Mutex::new(connection),
                default_iter_batch_size,
            }),
        }
    }

    /// Execute a driver operation on the connection.
    pub async fn exec(&self, op: impl Into<Operation>) -> Result<Response> {
        let op = op.into();
        match op.sql() {
            Some(sql) => tracing::debug!(sql, params = op.params().len(), write = op.is_write(), "exec"),
            None => tracing::debug!(?op, "exec"),
        }

        let mut connection = self.shared.connection.lock().await;
        connection.exec(op).await
    }

    /// Runs a query and buffers all of its rows, in result order.
    pub async fn query(&self, sql: impl Into<String>, params: Vec<Value>) -> Result<Vec<ValueRecord>> {
        let op = QuerySql {
            sql: sql.into(),
            params,
        };
        self.exec(op).await?.rows.into_values()
    }

    /// Runs a statement and returns the number of rows it changed.
    pub async fn execute(&self, sql: impl Into<String>, params: Vec<Value>) -> Result<u64> {
        let op = ExecSql {
            sql: sql.into(),
            params,
        };
        self.exec(op).await?.rows.into_count()
    }

    /// Inserts one row and returns the key the store generated for it.
    pub async fn insert(&self, sql: impl Into<String>, params: Vec<Value>) -> Result<Value> {
        let op = Insert {
            sql: sql.into(),
            params,
        };
        self.exec(op).await?.rows.into_key()
    }

    /// Describes a table's columns and primary key.
    pub async fn describe_table(&self, table: &str) -> Result<TableSchema> {
        let mut connection = self.shared.connection.lock().await;
        connection.describe_table(table).await
    }

    pub async fn table_exists(&self, table: &str) -> Result<bool> {
        let mut connection = self.shared.connection.lock().await;
        connection.table_exists(table).await
    }

    /// Runs setup DDL, expanding `{AUTO_INCREMENT}` for this database.
    pub async fn create_table(&self, ddl: &str) -> Result<()> {
        let ddl = expand_ddl(ddl, self.capability());
        self.execute(ddl, vec![]).await?;
        Ok(())
    }

    /// Drops a table if it exists.
    pub async fn drop_table(&self, table: &str) -> Result<()> {
        let sql = format!("DROP TABLE IF EXISTS {}", crate::table::quote_ident(table));
        self.execute(sql, vec![]).await?;
        Ok(())
    }

    pub async fn begin(&self) -> Result<()> {
        self.exec(Transaction::Start).await?;
        Ok(())
    }

    pub async fn commit(&self) -> Result<()> {
        self.exec(Transaction::Commit).await?;
        Ok(())
    }

    pub async fn rollback(&self) -> Result<()> {
        self.exec(Transaction::Rollback).await?;
        Ok(())
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    pub fn capability(&self) -> &'static Capability {
        self.shared.driver.capability()
    }

    pub(crate) fn default_iter_batch_size(&self) -> usize {
        self.shared.default_iter_batch_size
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("url", &self.shared.driver.url())
            .finish()
    }
}

fn expand_ddl(ddl: &str, capability: &Capability) -> String {
    ddl.replace(AUTO_INCREMENT, capability.auto_increment)
}
