use super::Table;
use crate::{Db, Result};

/// Options for opening a [`Table`].
///
/// Tables are read-only with the row cache enabled unless configured
/// otherwise.
pub struct TableBuilder {
    db: Db,
    name: String,
    writeable: bool,
    cache: bool,
    iter_batch_size: Option<usize>,

    /// Extra `(attribute, column)` names
    aliases: Vec<(String, String)>,

    drop_if_exists: bool,
    create: Option<String>,
}

impl TableBuilder {
    pub(super) fn new(db: &Db, name: impl Into<String>) -> TableBuilder {
        TableBuilder {
            db: db.clone(),
            name: name.into(),
            writeable: false,
            cache: true,
            iter_batch_size: None,
            aliases: vec![],
            drop_if_exists: false,
            create: None,
        }
    }

    /// Allows mutating operations on the table.
    pub fn writeable(&mut self, writeable: bool) -> &mut Self {
        self.writeable = writeable;
        self
    }

    /// Enables the row cache. Without it, every read builds a fresh row
    /// object.
    pub fn cache(&mut self, cache: bool) -> &mut Self {
        self.cache = cache;
        self
    }

    /// Number of rows lazy value iteration fetches per statement. Defaults
    /// to the database's setting.
    pub fn iter_batch_size(&mut self, size: usize) -> &mut Self {
        self.iter_batch_size = Some(size.max(1));
        self
    }

    /// Lets rows answer to `attribute` for `column`.
    pub fn alias(&mut self, attribute: impl Into<String>, column: impl Into<String>) -> &mut Self {
        self.aliases.push((attribute.into(), column.into()));
        self
    }

    /// Drops any existing table of this name before opening.
    pub fn drop_if_exists(&mut self, drop: bool) -> &mut Self {
        self.drop_if_exists = drop;
        self
    }

    /// Runs `ddl` before opening, typically a `CREATE TABLE` statement.
    /// `{AUTO_INCREMENT}` expands to the database's keyword.
    pub fn create(&mut self, ddl: impl Into<String>) -> &mut Self {
        self.create = Some(ddl.into());
        self
    }

    /// Runs any setup DDL, then reads the table's schema from the database.
    pub async fn open(&mut self) -> Result<Table> {
        let db = &self.db;

        if self.drop_if_exists {
            db.drop_table(&self.name).await?;
        }

        if let Some(ddl) = &self.create {
            db.create_table(ddl).await?;
        }

        let mut schema = db.describe_table(&self.name).await?;
        for (attribute, column) in &self.aliases {
            schema.add_alias(attribute.clone(), column)?;
        }

        let iter_batch_size = self
            .iter_batch_size
            .unwrap_or_else(|| db.default_iter_batch_size());

        tracing::debug!(
            table = %self.name,
            primary_key = %schema.primary_key().name,
            writeable = self.writeable,
            cache = self.cache,
            "opened table"
        );

        Ok(Table::new(
            db.clone(),
            schema,
            self.writeable,
            self.cache,
            iter_batch_size,
        ))
    }
}
