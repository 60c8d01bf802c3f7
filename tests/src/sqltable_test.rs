use crate::{exec_log::ExecLog, load_fixture, logging_driver::DriverOp, LoggingDriver, Setup};

use sqltable::{db, driver::Capability, Db};

use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex},
};

/// Owns the Tokio runtime a test runs on and the log of every operation the
/// test's database executed.
///
/// Tests are plain `#[test]` functions generated by the `tests!` macro; the
/// harness drives them on a current-thread runtime.
pub struct SqlTableTest {
    runtime: Option<tokio::runtime::Runtime>,
    setup: Box<dyn Setup>,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl SqlTableTest {
    /// Create a new SqlTableTest with a current-thread runtime.
    pub fn new(setup: Box<dyn Setup>) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create Tokio runtime");

        Self {
            runtime: Some(runtime),
            setup,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Connect a fresh database through the logging driver.
    pub async fn try_setup_db(&mut self, mut builder: db::Builder) -> sqltable::Result<Db> {
        let driver = LoggingDriver::new(self.setup.driver());
        self.ops_log = driver.ops_log_handle();

        builder.build(driver).await
    }

    /// A fresh, empty database.
    pub async fn setup_db(&mut self) -> Db {
        self.try_setup_db(Db::builder()).await.unwrap()
    }

    /// A fresh database holding the three fixture tables, with the setup
    /// statements cleared from the log.
    pub async fn setup_fixture(&mut self) -> Db {
        let db = self.setup_db().await;
        load_fixture(&db).await.unwrap();
        self.log().clear();
        db
    }

    /// Operations executed so far
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }

    pub fn capability(&self) -> &'static Capability {
        self.setup.capability()
    }

    /// Run a test function with a mutable reference to self, using our managed runtime.
    pub fn run_test<F>(&mut self, test_fn: F)
    where
        F: for<'a> FnOnce(&'a mut SqlTableTest) -> Pin<Box<dyn Future<Output = ()> + 'a>>,
    {
        let runtime = self.runtime.take().expect("test already running");
        runtime.block_on(test_fn(self));
        self.runtime = Some(runtime);
    }
}
