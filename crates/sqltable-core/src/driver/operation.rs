mod exec_sql;
pub use exec_sql::ExecSql;

mod insert;
pub use insert::Insert;

mod query_sql;
pub use query_sql::QuerySql;

mod transaction;
pub use transaction::Transaction;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Execute a statement that modifies rows, returning the affected count
    ExecSql(ExecSql),

    /// Insert one row, returning the key the store assigned to it
    Insert(Insert),

    /// Execute a SQL query, returning its rows
    QuerySql(QuerySql),

    /// Execute a transaction lifecycle op
    Transaction(Transaction),
}

impl Operation {
    /// Returns `true` for operations that may change stored rows.
    pub fn is_write(&self) -> bool {
        matches!(self, Operation::ExecSql(_) | Operation::Insert(_))
    }

    /// The SQL text carried by the operation, if any.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Operation::ExecSql(op) => Some(&op.sql),
            Operation::Insert(op) => Some(&op.sql),
            Operation::QuerySql(op) => Some(&op.sql),
            Operation::Transaction(_) => None,
        }
    }

    /// Values bound to the operation's placeholders.
    pub fn params(&self) -> &[crate::Value] {
        match self {
            Operation::ExecSql(op) => &op.params,
            Operation::Insert(op) => &op.params,
            Operation::QuerySql(op) => &op.params,
            Operation::Transaction(_) => &[],
        }
    }
}
