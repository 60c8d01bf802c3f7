use crate::{Error, Result};

use sqltable_core::{schema::TableSchema, Value, ValueRecord};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One record of a table, with one attribute per column.
///
/// A `Row` is a handle: clones refer to the same object, and a table's row
/// cache hands out the same object for the same key. Use [`Row::ptr_eq`] to
/// test identity; `==` compares table and values.
///
/// Attribute writes go through [`Table::set_attribute`], which persists the
/// value before updating the object.
///
/// [`Table::set_attribute`]: crate::Table::set_attribute
#[derive(Clone)]
pub struct Row {
    inner: Arc<RowInner>,
}

struct RowInner {
    schema: Arc<TableSchema>,
    values: Mutex<Vec<Value>>,
}

impl Row {
    pub(crate) fn new(schema: Arc<TableSchema>, record: ValueRecord) -> Row {
        debug_assert_eq!(
            record.len(),
            schema.columns.len(),
            "row width does not match table `{}`",
            schema.name
        );

        Row {
            inner: Arc::new(RowInner {
                schema,
                values: Mutex::new(record.into_vec()),
            }),
        }
    }

    /// The primary key.
    pub fn id(&self) -> Value {
        self.values()[self.inner.schema.primary_key_index()].clone()
    }

    /// Reads an attribute by column name, alias, or `id`.
    pub fn get(&self, attribute: &str) -> Result<Value> {
        let index = self.inner.schema.resolve_or_err(attribute)?;
        Ok(self.values()[index].clone())
    }

    /// Reads an attribute and converts it to `T`.
    pub fn get_as<T>(&self, attribute: &str) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        T::try_from(self.get(attribute)?)
    }

    /// A copy of all column values, in column order.
    pub fn to_record(&self) -> ValueRecord {
        ValueRecord::from_vec(self.values().clone())
    }

    pub fn table_name(&self) -> &str {
        &self.inner.schema.name
    }

    pub fn schema(&self) -> &TableSchema {
        &self.inner.schema
    }

    /// Returns `true` if both handles refer to the same row object.
    pub fn ptr_eq(a: &Row, b: &Row) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub(crate) fn set_value(&self, index: usize, value: Value) {
        self.values()[index] = value;
    }

    pub(crate) fn set_id(&self, key: Value) {
        let index = self.inner.schema.primary_key_index();
        self.set_value(index, key);
    }

    /// Replaces all values with a fresher copy read from the store.
    pub(crate) fn refresh(&self, record: ValueRecord) {
        *self.values() = record.into_vec();
    }

    fn values(&self) -> MutexGuard<'_, Vec<Value>> {
        self.inner
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Row) -> bool {
        if Row::ptr_eq(self, other) {
            return true;
        }

        if self.table_name() != other.table_name() {
            return false;
        }

        // Never hold both locks at once
        let values = self.values().clone();
        values == *other.values()
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values = self.values();
        let mut s = f.debug_struct("Row");
        s.field("table", &self.inner.schema.name);
        for (column, value) in self.inner.schema.columns.iter().zip(values.iter()) {
            s.field(&column.name, value);
        }
        s.finish()
    }
}
