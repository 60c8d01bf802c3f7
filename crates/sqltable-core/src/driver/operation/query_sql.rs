use super::Operation;

use crate::Value;

#[derive(Debug, Clone)]
pub struct QuerySql {
    /// The SQL query to execute, with `?` placeholders
    pub sql: String,

    /// Values bound to the placeholders, in order
    pub params: Vec<Value>,
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}
