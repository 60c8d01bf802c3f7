mod column;
pub use column::{Column, Type};

mod table;
pub use table::TableSchema;
