use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidMildNotOperand,
    UnsupportedSegmenterOutput,
    Cancelled,
    InvalidInput,
    Parse,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    pub fn cancelled() -> Self {
        Error::new(ErrorKind::Cancelled, "full-text evaluation interrupted".to_string())
    }

    /// An operand of a mild-not produced exclusions, which the operator cannot reason about.
    pub fn invalid_mild_not(side: &str) -> Self {
        Error::new(
            ErrorKind::InvalidMildNotOperand,
            format!("the {} operand of 'not in' must not contain 'ftnot'", side),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
