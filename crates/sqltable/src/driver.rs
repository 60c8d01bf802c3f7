pub use sqltable_core::driver::{
    operation::{self, Operation},
    Capability, Connection, Driver, Response, Rows,
};
