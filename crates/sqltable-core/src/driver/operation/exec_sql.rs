use super::Operation;

use crate::Value;

#[derive(Debug, Clone)]
pub struct ExecSql {
    /// The SQL statement to execute, with `?` placeholders
    pub sql: String,

    /// Values bound to the placeholders, in order
    pub params: Vec<Value>,
}

impl From<ExecSql> for Operation {
    fn from(value: ExecSql) -> Self {
        Self::ExecSql(value)
    }
}
