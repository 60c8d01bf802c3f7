mod builder;
pub use builder::TableBuilder;

mod cache;
use cache::RowCache;

mod create;
pub use create::Create;

mod sql;
pub(crate) use sql::quote_ident;
use sql::Statements;

use crate::{cursor::Snapshot, Cursor, Db, Error, Result, Row};

use sqltable_core::{err, schema::TableSchema, Value, ValueRecord};

use std::{collections::HashMap, sync::Arc};

/// A dict-like view of one SQL table, keyed by its primary key.
///
/// Reads return [`Row`] objects. With the row cache enabled (the default),
/// the same key yields the same object until the key is deleted or renamed
/// through this table. Every write is sent to the store before the call
/// returns; read-only tables reject writes before any SQL is issued.
///
/// Cloning a `Table` is cheap and shares its row cache. Two tables opened
/// separately over the same SQL table keep separate caches.
#[derive(Clone)]
pub struct Table {
    inner: Arc<TableInner>,
}

struct TableInner {
    db: Db,
    schema: Arc<TableSchema>,
    writeable: bool,
    cache: RowCache,

    /// Keys per `IN (...)` fetch during lazy value iteration
    iter_batch_size: usize,

    sql: Statements,
}

impl Table {
    /// Opens a read-only table with the row cache enabled.
    pub async fn open(db: &Db, name: &str) -> Result<Table> {
        Table::builder(db, name).open().await
    }

    pub fn builder(db: &Db, name: impl Into<String>) -> TableBuilder {
        TableBuilder::new(db, name)
    }

    pub(crate) fn new(
        db: Db,
        schema: TableSchema,
        writeable: bool,
        cache: bool,
        iter_batch_size: usize,
    ) -> Table {
        let iter_batch_size = iter_batch_size
            .min(db.capability().max_bind_params)
            .max(1);

        Table {
            inner: Arc::new(TableInner {
                sql: Statements::new(&schema),
                db,
                schema: Arc::new(schema),
                writeable,
                cache: RowCache::new(cache),
                iter_batch_size,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.schema.name
    }

    pub fn schema(&self) -> &TableSchema {
        &self.inner.schema
    }

    pub fn is_writeable(&self) -> bool {
        self.inner.writeable
    }

    pub fn db(&self) -> &Db {
        &self.inner.db
    }

    /// Number of rows in the store.
    pub async fn len(&self) -> Result<u64> {
        let mut records = self.db().query(&self.inner.sql.count, vec![]).await?;
        let Some(mut record) = records.pop() else {
            return Err(err!("COUNT(*) on `{}` returned no rows", self.name()));
        };
        let count = i64::try_from(record.take(0))?;
        Ok(count as u64)
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Returns `true` if a row with this key exists in the store.
    ///
    /// Always asks the store; the row cache is not consulted and no row
    /// object is built.
    pub async fn contains(&self, key: impl Into<Value>) -> Result<bool> {
        let records = self
            .db()
            .query(&self.inner.sql.contains, vec![key.into()])
            .await?;
        Ok(!records.is_empty())
    }

    /// Returns the row for `key`, failing with a record not found error if
    /// there is none.
    pub async fn get(&self, key: impl Into<Value>) -> Result<Row> {
        let key = key.into();
        match self.find(key.clone()).await? {
            Some(row) => Ok(row),
            None => Err(self.not_found(&key)),
        }
    }

    /// Returns the row for `key`, or `None` if there is none.
    pub async fn find(&self, key: impl Into<Value>) -> Result<Option<Row>> {
        let key = key.into();
        if let Some(row) = self.inner.cache.get(&key) {
            return Ok(Some(row));
        }

        self.load(key).await
    }

    /// Returns the row for `key`, or `default` if there is none.
    pub async fn get_or(&self, key: impl Into<Value>, default: Row) -> Result<Row> {
        Ok(self.find(key).await?.unwrap_or(default))
    }

    /// All keys, in primary-key order.
    pub async fn keys(&self) -> Result<Vec<Value>> {
        let records = self.db().query(&self.inner.sql.keys, vec![]).await?;
        Ok(records.into_iter().map(|mut record| record.take(0)).collect())
    }

    /// All rows, in primary-key order.
    pub async fn values(&self) -> Result<Vec<Row>> {
        let records = self.db().query(&self.inner.sql.values, vec![]).await?;
        Ok(records
            .into_iter()
            .map(|record| self.materialize(record))
            .collect())
    }

    /// All `(key, row)` pairs, in primary-key order.
    pub async fn items(&self) -> Result<Vec<(Value, Row)>> {
        let rows = self.values().await?;
        Ok(rows.into_iter().map(|row| (row.id(), row)).collect())
    }

    /// Lazily yields every key present when iteration starts.
    ///
    /// The keys are snapshotted before the first one is yielded, so the
    /// caller may run other statements on the same database between items.
    pub fn iter_keys(&self) -> Cursor<Value> {
        let table = self.clone();

        Cursor::from_stream(async_stream::try_stream! {
            let snapshot = Snapshot::take(&table).await?;

            for key in snapshot {
                yield key;
            }
        })
    }

    /// Lazily yields every row whose key is present when iteration starts.
    ///
    /// Rows are fetched in batches after the key snapshot is taken. A row
    /// deleted before its batch is fetched is skipped.
    pub fn iter_values(&self) -> Cursor<Row> {
        let table = self.clone();

        Cursor::from_stream(async_stream::try_stream! {
            let mut snapshot = Snapshot::take(&table).await?;

            while !snapshot.is_empty() {
                let batch = snapshot.next_batch(table.inner.iter_batch_size);

                for row in table.fetch_batch(batch).await? {
                    yield row;
                }
            }
        })
    }

    /// Lazily yields `(key, row)` pairs, with the isolation of
    /// [`Table::iter_values`].
    pub fn iter_items(&self) -> Cursor<(Value, Row)> {
        let mut values = self.iter_values();

        Cursor::from_stream(async_stream::try_stream! {
            while let Some(row) = values.next().await {
                let row = row?;
                yield (row.id(), row);
            }
        })
    }

    /// Starts building a new row.
    pub fn create(&self) -> Create<'_> {
        Create::new(self)
    }

    /// Moves `row` to a new primary key.
    ///
    /// Updates the key column in the store, then re-registers the object in
    /// the cache under `key` and rewrites its `id` in place. The old key no
    /// longer resolves.
    pub async fn set(&self, key: impl Into<Value>, row: &Row) -> Result<()> {
        self.ensure_writeable("set")?;
        self.ensure_member(row)?;

        let key = key.into();
        let old = row.id();
        if old == key {
            return Ok(());
        }

        let count = self
            .db()
            .execute(&self.inner.sql.rekey, vec![key.clone(), old.clone()])
            .await?;
        if count == 0 {
            return Err(self.not_found(&old));
        }

        // The store may coerce the key, e.g. "13" into an INTEGER column
        let stored = self.stored_key(key.clone()).await?.unwrap_or(key);

        self.inner.cache.evict(&old);
        row.set_id(stored.clone());
        self.inner.cache.put(stored, row.clone());
        Ok(())
    }

    /// Deletes the row for `key`.
    ///
    /// The key is matched the way the store compares it, and the cached row
    /// stored under the matching key is evicted.
    pub async fn delete(&self, key: impl Into<Value>) -> Result<()> {
        self.ensure_writeable("delete")?;

        let key = key.into();
        let Some(stored) = self.stored_key(key.clone()).await? else {
            return Err(self.not_found(&key));
        };

        let count = self
            .db()
            .execute(&self.inner.sql.delete, vec![stored.clone()])
            .await?;
        if count == 0 {
            return Err(self.not_found(&key));
        }

        self.inner.cache.evict(&stored);
        Ok(())
    }

    /// Writes one attribute of `row` to the store, then to the object.
    ///
    /// Writing the primary key (by column name or `id`) moves the row as
    /// [`Table::set`] does.
    pub async fn set_attribute(
        &self,
        row: &Row,
        attribute: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.ensure_writeable("set_attribute")?;
        self.ensure_member(row)?;

        let schema = self.schema();
        let index = schema.resolve_or_err(attribute)?;
        let value = value.into();

        if index == schema.primary_key_index() {
            return self.set(value, row).await;
        }

        let key = row.id();
        let sql = self.inner.sql.update_column(&schema.columns[index].name);
        let count = self.db().execute(sql, vec![value.clone(), key.clone()]).await?;
        if count == 0 {
            return Err(self.not_found(&key));
        }

        row.set_value(index, value);
        Ok(())
    }

    /// The key as the store holds it, if a row matches `key`. Cache entries
    /// are always keyed by this form.
    async fn stored_key(&self, key: Value) -> Result<Option<Value>> {
        let mut records = self.db().query(&self.inner.sql.key, vec![key]).await?;
        Ok(records.pop().map(|mut record| record.take(0)))
    }

    /// Reads the row for `key` from the store, bypassing the cache lookup.
    pub(crate) async fn load(&self, key: Value) -> Result<Option<Row>> {
        let mut records = self.db().query(&self.inner.sql.get, vec![key]).await?;
        Ok(records.pop().map(|record| self.materialize(record)))
    }

    /// Fetches the rows for `keys` with one statement, in `keys` order.
    /// Keys with no row are skipped.
    pub(crate) async fn fetch_batch(&self, keys: Vec<Value>) -> Result<Vec<Row>> {
        if keys.is_empty() {
            return Ok(vec![]);
        }

        let sql = self.inner.sql.get_many(keys.len());
        let records = self.db().query(sql, keys.clone()).await?;

        let pk = self.schema().primary_key_index();
        let mut by_key = records
            .into_iter()
            .map(|record| (record[pk].clone(), record))
            .collect::<HashMap<_, _>>();

        let mut rows = Vec::with_capacity(by_key.len());
        for key in &keys {
            match by_key.remove(key) {
                Some(record) => rows.push(self.materialize(record)),
                None => tracing::trace!(table = self.name(), %key, "row gone before fetch"),
            }
        }
        Ok(rows)
    }

    /// Turns a full-width record into a row object.
    ///
    /// A cached row for the same key is refreshed in place and returned, so
    /// identity holds across bulk reads.
    fn materialize(&self, record: ValueRecord) -> Row {
        let key = record[self.schema().primary_key_index()].clone();

        if let Some(row) = self.inner.cache.get(&key) {
            row.refresh(record);
            return row;
        }

        let row = Row::new(self.inner.schema.clone(), record);
        self.inner.cache.put(key, row.clone());
        row
    }

    fn ensure_writeable(&self, op: &str) -> Result<()> {
        if self.inner.writeable {
            Ok(())
        } else {
            Err(Error::write_not_permitted(format!(
                "{op} on read-only table `{}`",
                self.name()
            )))
        }
    }

    fn ensure_member(&self, row: &Row) -> Result<()> {
        if row.table_name() == self.name() {
            Ok(())
        } else {
            Err(err!(
                "row of table `{}` used with table `{}`",
                row.table_name(),
                self.name()
            ))
        }
    }

    fn not_found(&self, key: &Value) -> Error {
        Error::record_not_found(format!("table={}; key={key}", self.name()))
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name())
            .field("writeable", &self.inner.writeable)
            .field("cached", &self.inner.cache.len())
            .finish()
    }
}
