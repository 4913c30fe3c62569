pub mod lot_csv;

pub use self::lot_csv::{load_lots, parse_lots_csv, save_lots, write_lots_csv};
