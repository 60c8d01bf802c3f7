//! Common imports for test files
//!
//! This module provides a convenient way to import frequently used items
//! in test files with `use tests::prelude::*;`

pub use crate::{load_fixture, open_table, SqlTableTest, SEQS, TEST1, TEST2};

// Re-export macros
pub use crate::tests;

pub use sqltable::{Db, GraphView, MapView, Row, Table, Value};
