use crate::{stmt::ValueRecord, Result, Value};

#[derive(Debug, Clone)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Key generated by the store for an inserted row
    Key(Value),

    /// Operation result, fully buffered, in the order the store produced it
    Values(Vec<ValueRecord>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn key(key: Value) -> Self {
        Self {
            rows: Rows::Key(key),
        }
    }

    pub fn values(values: Vec<ValueRecord>) -> Self {
        Self {
            rows: Rows::Values(values),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Rows::Count(count) => Ok(count),
            _ => Err(err!("expected a row count, got {self:?}")),
        }
    }

    pub fn into_key(self) -> Result<Value> {
        match self {
            Rows::Key(key) => Ok(key),
            _ => Err(err!("expected a generated key, got {self:?}")),
        }
    }

    pub fn into_values(self) -> Result<Vec<ValueRecord>> {
        match self {
            Rows::Values(values) => Ok(values),
            _ => Err(err!("expected result rows, got {self:?}")),
        }
    }
}
