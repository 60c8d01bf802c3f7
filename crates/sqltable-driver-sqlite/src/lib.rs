mod value;
pub(crate) use value::Value;

use rusqlite::Connection as RusqliteConnection;
use sqltable_core::{
    async_trait,
    driver::{
        operation::{Operation, Transaction},
        Capability, Driver, Response,
    },
    schema::{Column, TableSchema, Type},
    stmt::ValueRecord,
    Result,
};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            sqltable_core::Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(sqltable_core::Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn connect(&self) -> Result<Box<dyn sqltable_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory()
            .map_err(sqltable_core::Error::driver_operation_failed)?;
        tracing::debug!("opened in-memory sqlite database");

        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path.as_ref())
            .map_err(sqltable_core::Error::driver_operation_failed)?;
        tracing::debug!(path = %path.as_ref().display(), "opened sqlite database");

        Ok(Self { connection })
    }

    fn query(&mut self, sql: &str, params: Vec<sqltable_core::Value>) -> Result<Response> {
        let mut stmt = self
            .connection
            .prepare_cached(sql)
            .map_err(sqltable_core::Error::driver_operation_failed)?;

        let width = stmt.column_count();
        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(sqltable_core::Error::driver_operation_failed)?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut items = Vec::with_capacity(width);

                    for index in 0..width {
                        items.push(Value::from_sql(row, index)?.into_inner());
                    }

                    ret.push(ValueRecord::from_vec(items));
                }
                Ok(None) => break,
                Err(err) => {
                    return Err(sqltable_core::Error::driver_operation_failed(err));
                }
            }
        }

        Ok(Response::values(ret))
    }

    fn execute(&mut self, sql: &str, params: Vec<sqltable_core::Value>) -> Result<usize> {
        let mut stmt = self
            .connection
            .prepare_cached(sql)
            .map_err(sqltable_core::Error::driver_operation_failed)?;

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        stmt.execute(rusqlite::params_from_iter(params.iter()))
            .map_err(sqltable_core::Error::driver_operation_failed)
    }
}

#[async_trait]
impl sqltable_core::driver::Connection for Connection {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(op) => self.query(&op.sql, op.params),
            Operation::ExecSql(op) => {
                let count = self.execute(&op.sql, op.params)?;
                Ok(Response::count(count as _))
            }
            Operation::Insert(op) => {
                self.execute(&op.sql, op.params)?;
                let key = self.connection.last_insert_rowid();
                Ok(Response::key(key.into()))
            }
            Operation::Transaction(Transaction::Start) => {
                self.connection
                    .execute("BEGIN", [])
                    .map_err(sqltable_core::Error::driver_operation_failed)?;
                Ok(Response::count(0))
            }
            Operation::Transaction(Transaction::Commit) => {
                self.connection
                    .execute("COMMIT", [])
                    .map_err(sqltable_core::Error::driver_operation_failed)?;
                Ok(Response::count(0))
            }
            Operation::Transaction(Transaction::Rollback) => {
                self.connection
                    .execute("ROLLBACK", [])
                    .map_err(sqltable_core::Error::driver_operation_failed)?;
                Ok(Response::count(0))
            }
        }
    }

    async fn describe_table(&mut self, table: &str) -> Result<TableSchema> {
        let mut stmt = self
            .connection
            .prepare("SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid")
            .map_err(sqltable_core::Error::driver_operation_failed)?;

        let columns = stmt
            .query_map([table], |row| {
                let declared: String = row.get(1)?;
                let not_null: bool = row.get(2)?;
                let pk: i64 = row.get(3)?;

                Ok(Column {
                    name: row.get(0)?,
                    ty: Type::from_declared(&declared),
                    nullable: !not_null && pk == 0,
                    primary_key: pk > 0,
                })
            })
            .map_err(sqltable_core::Error::driver_operation_failed)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sqltable_core::Error::driver_operation_failed)?;

        TableSchema::new(table, columns)
    }

    async fn table_exists(&mut self, table: &str) -> Result<bool> {
        let mut stmt = self
            .connection
            .prepare_cached("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")
            .map_err(sqltable_core::Error::driver_operation_failed)?;

        stmt.exists([table])
            .map_err(sqltable_core::Error::driver_operation_failed)
    }
}
