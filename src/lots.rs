pub mod csv_common;
pub mod error;
pub mod io;
pub mod model;
pub mod report;

pub use self::error::*;
pub use self::model::lot::*;
