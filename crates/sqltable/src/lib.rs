//! SQL tables as key-indexed collections of cached row objects.
//!
//! A [`Table`] exposes one SQL table as a dict-like container keyed by its
//! primary key. Rows are materialized lazily into [`Row`] objects and cached
//! per table, so two lookups of the same key return the same object until the
//! key is deleted or renamed. Writes go straight to the store.
//!
//! [`MapView`] and [`GraphView`] derive relations between two tables from a
//! join query with one `?` placeholder bound to the source row's key.
//!
//! ```no_run
//! # async fn example() -> sqltable::Result<()> {
//! use sqltable::{Db, Table};
//!
//! let db = Db::connect("sqlite::memory:").await?;
//! db.create_table(
//!     "CREATE TABLE seqs (id INTEGER PRIMARY KEY {AUTO_INCREMENT}, seq_id TEXT)",
//! )
//! .await?;
//!
//! let seqs = Table::builder(&db, "seqs").writeable(true).open().await?;
//! let row = seqs.create().set("seq_id", "chr1").exec().await?;
//!
//! assert!(seqs.contains(row.id()).await?);
//! # Ok(())
//! # }
//! ```

pub mod cursor;
pub use cursor::Cursor;

pub mod db;
pub use db::Db;

pub mod driver;

mod row;
pub use row::Row;

pub mod table;
pub use table::{Create, Table, TableBuilder};

pub mod view;
pub use view::{GraphView, MapView};

pub use sqltable_core::{schema::TableSchema, Error, Result, Value, ValueRecord};
