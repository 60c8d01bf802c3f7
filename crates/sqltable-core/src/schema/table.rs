use super::Column;
use crate::{Error, Result};

use indexmap::IndexMap;

/// Attribute name that always refers to the primary-key column.
const ID_ATTRIBUTE: &str = "id";

/// Shape of one SQL table: its columns, which one is the primary key, and
/// the attribute names rows expose for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// The table name, as it appears in SQL
    pub name: String,

    /// Columns in declaration order
    pub columns: Vec<Column>,

    /// Index of the primary-key column in `columns`
    primary_key: usize,

    /// Extra attribute names mapped to column indices
    aliases: IndexMap<String, usize>,
}

impl TableSchema {
    /// Builds a schema from introspected columns.
    ///
    /// Fails unless exactly one column is marked as the primary key.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<TableSchema> {
        let name = name.into();

        if columns.is_empty() {
            return Err(Error::invalid_schema(format!(
                "table `{name}` does not exist or has no columns"
            )));
        }

        let mut pk = columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.primary_key)
            .map(|(index, _)| index);

        let primary_key = match (pk.next(), pk.next()) {
            (Some(index), None) => index,
            (None, _) => {
                return Err(Error::invalid_schema(format!(
                    "table `{name}` has no primary key"
                )))
            }
            (Some(_), Some(_)) => {
                return Err(Error::invalid_schema(format!(
                    "table `{name}` has a composite primary key"
                )))
            }
        };

        Ok(TableSchema {
            name,
            columns,
            primary_key,
            aliases: IndexMap::new(),
        })
    }

    /// Maps an additional attribute name onto an existing column.
    pub fn add_alias(&mut self, attribute: impl Into<String>, column: &str) -> Result<()> {
        let attribute = attribute.into();
        let Some(index) = self.column_index(column) else {
            return Err(self.unknown_column(column));
        };
        if attribute == ID_ATTRIBUTE && index != self.primary_key {
            return Err(Error::invalid_schema(format!(
                "attribute `id` is reserved for the primary key of `{}`",
                self.name
            )));
        }
        self.aliases.insert(attribute, index);
        Ok(())
    }

    /// The primary-key column.
    pub fn primary_key(&self) -> &Column {
        &self.columns[self.primary_key]
    }

    /// Index of the primary-key column.
    pub fn primary_key_index(&self) -> usize {
        self.primary_key
    }

    /// Resolves an attribute name to a column index.
    ///
    /// `id` always resolves to the primary key. Real column names and
    /// registered aliases resolve to their column.
    pub fn resolve(&self, attribute: &str) -> Option<usize> {
        if attribute == ID_ATTRIBUTE {
            return Some(self.primary_key);
        }

        self.column_index(attribute)
            .or_else(|| self.aliases.get(attribute).copied())
    }

    /// Like [`TableSchema::resolve`], failing with an invalid schema error.
    pub fn resolve_or_err(&self, attribute: &str) -> Result<usize> {
        self.resolve(attribute)
            .ok_or_else(|| self.unknown_column(attribute))
    }

    /// Index of a column by its real name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    fn unknown_column(&self, name: &str) -> Error {
        Error::invalid_schema(format!(
            "table `{}` has no column `{}`",
            self.name, name
        ))
    }
}
