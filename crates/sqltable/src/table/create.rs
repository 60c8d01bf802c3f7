use super::Table;
use crate::{Result, Row};

use indexmap::IndexMap;
use sqltable_core::{schema::Type, Error, Value};

/// Builds one new row of a writeable table.
///
/// Attributes are given by column name, alias, or `id`. Omitting the
/// primary key lets the store generate one, which only INTEGER keys support.
#[derive(Debug)]
pub struct Create<'a> {
    table: &'a Table,
    fields: IndexMap<String, Value>,
}

impl<'a> Create<'a> {
    pub(super) fn new(table: &'a Table) -> Create<'a> {
        Create {
            table,
            fields: IndexMap::new(),
        }
    }

    /// Uses an explicit primary key.
    pub fn id(self, key: impl Into<Value>) -> Self {
        self.set("id", key)
    }

    pub fn set(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(attribute.into(), value.into());
        self
    }

    /// Inserts the row and returns its cached row object, read back from the
    /// store.
    pub async fn exec(self) -> Result<Row> {
        let table = self.table;
        table.ensure_writeable("create")?;

        let schema = table.schema();
        let mut columns = IndexMap::new();
        for (attribute, value) in self.fields {
            columns.insert(schema.resolve_or_err(&attribute)?, value);
        }

        let sql = table
            .inner
            .sql
            .insert(columns.keys().map(|&index| schema.columns[index].name.as_str()));
        let explicit = columns.get(&schema.primary_key_index()).cloned();
        if explicit.is_none() && schema.primary_key().ty != Type::Integer {
            return Err(Error::invalid_schema(format!(
                "table `{}` cannot generate keys for column `{}`; supply `id`",
                table.name(),
                schema.primary_key().name
            )));
        }
        let params = columns.into_values().collect();

        let key = match explicit {
            Some(key) => {
                table.db().execute(sql, params).await?;
                key
            }
            None => table.db().insert(sql, params).await?,
        };

        match table.load(key.clone()).await? {
            Some(row) => Ok(row),
            None => Err(table.not_found(&key)),
        }
    }
}
