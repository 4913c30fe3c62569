use std::fmt::Display;

/// Errors from reading or writing lot files.
///
/// Inconsistent lot data found while reporting (eg. an adjustment which
/// does not match basis - proceeds) is not represented here. That is a bug
/// in whatever produced the lots, and panics.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum LotError {
    /// A malformed date, count or amount, or a row which is too short.
    Parse(String),
    /// The file could not be opened, read or written.
    Io(String),
}

impl LotError {
    pub fn parse<S: Into<String>>(msg: S) -> LotError {
        LotError::Parse(msg.into())
    }

    pub fn msg(&self) -> &str {
        match self {
            LotError::Parse(m) => m,
            LotError::Io(m) => m,
        }
    }

    /// Prefixes the message with some context (like the file and row),
    /// keeping the variant.
    pub fn context(self, ctx: &str) -> LotError {
        match self {
            LotError::Parse(m) => LotError::Parse(format!("{ctx}: {m}")),
            LotError::Io(m) => LotError::Io(format!("{ctx}: {m}")),
        }
    }
}

impl Display for LotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.msg())
    }
}

impl std::error::Error for LotError {}

impl From<std::io::Error> for LotError {
    fn from(e: std::io::Error) -> Self {
        LotError::Io(e.to_string())
    }
}

impl From<csv::Error> for LotError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            LotError::Io(e.to_string())
        } else {
            LotError::Parse(e.to_string())
        }
    }
}
