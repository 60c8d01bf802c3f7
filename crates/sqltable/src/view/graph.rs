use super::JoinView;
use crate::{Result, Row, Table};

/// A multi-valued relation: each source row maps to a list of target rows,
/// in the order the query returns them.
#[derive(Debug, Clone)]
pub struct GraphView {
    join: JoinView,
}

impl GraphView {
    pub fn new(source: &Table, target: &Table, sql: impl Into<String>) -> GraphView {
        GraphView {
            join: JoinView::new(source, target, sql),
        }
    }

    /// Returns the target rows for `row`, possibly none.
    pub async fn get(&self, row: &Row) -> Result<Vec<Row>> {
        let records = self.join.query(row).await?;

        let mut targets = Vec::with_capacity(records.len());
        for record in records {
            targets.push(self.join.resolve(record).await?);
        }
        Ok(targets)
    }

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
