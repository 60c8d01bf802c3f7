use super::JoinView;
use crate::{Error, Result, Row, Table};

/// A single-valued relation: each source row maps to at most one target row.
///
/// A lookup whose query yields more than one row fails with a non-unique
/// mapping error instead of picking one.
#[derive(Debug, Clone)]
pub struct MapView {
    join: JoinView,
}

impl MapView {
    pub fn new(source: &Table, target: &Table, sql: impl Into<String>) -> MapView {
        MapView {
            join: JoinView::new(source, target, sql),
        }
    }

    /// Returns the target row `row` maps to.
    pub async fn get(&self, row: &Row) -> Result<Row> {
        let mut records = self.join.query(row).await?;

        match records.len() {
            0 => Err(self.join.no_mapping(row)),
            1 => {
                let record = records.remove(0);
                self.join.resolve(record).await
            }
            n => {
                tracing::warn!(view = %self.join.describe(row), rows = n, "non-unique mapping");
                Err(Error::non_unique_mapping(format!(
                    "{}; rows={n}",
                    self.join.describe(row)
                )))
            }
        }
    }

    /// Returns `true` if the query yields any row for `row`.
    pub async fn contains(&self, row: &Row) -> Result<bool> {
        self.join.contains(row).await
    }

    pub fn source(&self) -> &Table {
        &self.join.source
    }

    pub fn target(&self) -> &Table {
        &self.join.target
    }
}
