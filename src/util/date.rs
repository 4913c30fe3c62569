pub use time::Date;
use time::{macros::format_description, UtcOffset};

pub type StaticDateFormat<'a> =
    &'static [time::format_description::BorrowedFormatItem<'a>];

// Lot files use US-style dates. Hand-edited files often drop the leading
// zero, so parsing accepts one or two digits for month and day.
pub const LOT_DATE_PARSE_FORMAT: StaticDateFormat =
    format_description!("[month padding:none]/[day padding:none]/[year]");

pub const LOT_DATE_FORMAT: StaticDateFormat =
    format_description!("[month]/[day]/[year]");

pub fn parse_lot_date(date_str: &str) -> Result<Date, time::error::Parse> {
    Date::parse(date_str.trim(), LOT_DATE_PARSE_FORMAT)
}

pub fn to_lot_date_string(d: &Date) -> String {
    // Format only fails on components the format does not contain.
    d.format(LOT_DATE_FORMAT).unwrap_or_else(|_| d.to_string())
}

// This is a (possibly unsafe, but no worse than chrono's Local::now) way
// to get the current system UtcOffset of local timezone.
// Using UtcOffset::current_local_offset is apparently unsafe on Linux,
// and will return an error if used without enabling some "unsafe" feature.
pub fn local_utc_offset() -> Result<UtcOffset, time::error::ComponentRange> {
    let now = chrono::offset::Local::now();
    let offset = now.offset();
    UtcOffset::from_whole_seconds(-1 * offset.utc_minus_local())
}

// Used by both unit and integration tests
pub mod pub_testlib {
    use time::{Date, Month};

    pub fn mdy(year: i32, month: u8, day: u8) -> Date {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day)
            .unwrap()
    }
}
