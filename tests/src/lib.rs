
mod logging_driver;
pub mod prelude;
mod sqltable_test;

pub use exec_log::ExecLog;
pub use fixture::{load_fixture, open_table, SEQS, TEST1, TEST2};
pub use logging_driver::{DriverOp, LoggingDriver};
pub use sqltable_test::SqlTableTest;

use sqltable::driver::{Capability, Driver};

/// A store the suite can run against.
pub trait Setup: Send + Sync + 'static {
    /// A driver for a fresh, empty database.
    fn driver(&self) -> Box<dyn Driver>;

    fn capability(&self) -> &'static Capability;
}
