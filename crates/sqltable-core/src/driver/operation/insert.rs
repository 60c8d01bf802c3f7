use super::Operation;

use crate::Value;

/// Insert a single row.
///
/// The driver reads back the generated primary key before releasing the
/// connection, so no other statement can run between the insert and the
/// key lookup.
#[derive(Debug, Clone)]
pub struct Insert {
    /// The INSERT statement, with `?` placeholders
    pub sql: String,

    /// Values bound to the placeholders, in order
    pub params: Vec<Value>,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
