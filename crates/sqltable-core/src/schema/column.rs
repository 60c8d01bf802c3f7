/// A column as described by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// The column name
    pub name: String,

    /// Storage type derived from the declared SQL type
    pub ty: Type,

    /// Whether the column accepts NULL
    pub nullable: bool,

    /// Whether the column is (part of) the primary key
    pub primary_key: bool,
}

/// Column storage type.
///
/// Derived from the declared column type using SQL type-affinity rules, so
/// `VARCHAR(16)` maps to `Text` and `INTEGER` maps to `Integer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Integer,
    Real,
    Text,
    Blob,
    Numeric,
}

impl Type {
    /// Determines the storage type for a declared column type.
    pub fn from_declared(declared: &str) -> Type {
        let declared = declared.to_ascii_uppercase();

        if declared.contains("INT") {
            Type::Integer
        } else if declared.contains("CHAR") || declared.contains("CLOB") || declared.contains("TEXT")
        {
            Type::Text
        } else if declared.is_empty() || declared.contains("BLOB") {
            Type::Blob
        } else if declared.contains("REAL") || declared.contains("FLOA") || declared.contains("DOUB")
        {
            Type::Real
        } else {
            Type::Numeric
        }
    }
}
