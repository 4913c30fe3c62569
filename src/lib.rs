pub mod app;
pub mod cmd;
pub mod log;
pub mod lots;
pub mod tracing;
pub mod util;

extern crate lazy_static;

#[cfg(any(test, feature = "testlib"))]
pub mod testlib;
