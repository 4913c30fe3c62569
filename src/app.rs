pub mod approot;

pub use self::approot::*;

// Version is of the format 0.YY.MM, so it is immediately clear when
// the tool was last updated.
pub const LOTBOOK_APP_VERSION: &str = "0.26.10";
