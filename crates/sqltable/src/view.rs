//! Relations derived from a join query between two tables.
//!
//! A view's query has exactly one `?` placeholder, bound to the primary key
//! of the source row. The first column of each result row is a primary key
//! of the target table.

mod graph;
pub use graph::GraphView;

mod map;
pub use map::MapView;

use crate::{Db, Error, Result, Row, Table};

use sqltable_core::{err, ValueRecord};

/// The query pipeline shared by both view kinds.
#[derive(Debug, Clone)]
struct JoinView {
    source: Table,
    target: Table,
    sql: String,
}

impl JoinView {
    fn new(source: &Table, target: &Table, sql: impl Into<String>) -> JoinView {
        JoinView {
            source: source.clone(),
            target: target.clone(),
            sql: sql.into(),
        }
    }

    /// Views run their queries on the source table's database.
    fn db(&self) -> &Db {
        self.source.db()
    }

    async fn query(&self, row: &Row) -> Result<Vec<ValueRecord>> {
        if row.table_name() != self.source.name() {
            return Err(err!(
                "view over `{}` given a row of `{}`",
                self.source.name(),
                row.table_name()
            ));
        }

        self.db().query(&self.sql, vec![row.id()]).await
    }

    async fn contains(&self, row: &Row) -> Result<bool> {
        Ok(!self.query(row).await?.is_empty())
    }

    /// Looks up the target row named by the first column of `record`.
    async fn resolve(&self, mut record: ValueRecord) -> Result<Row> {
        self.target.get(record.take(0)).await
    }

    fn describe(&self, row: &Row) -> String {
        format!(
            "{} -> {}; key={}",
            self.source.name(),
            self.target.name(),
            row.id()
        )
    }

    fn no_mapping(&self, row: &Row) -> Error {
        Error::record_not_found(self.describe(row))
    }
}
