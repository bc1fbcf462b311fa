use thiserror::Error;

/// A cql2-json validation failure.
///
/// Carries the path of the offending value (`$.args[1]`-style) and a
/// human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cql2-json at {path}: {message}")]
pub struct ValidationError {
    /// Path of the offending JSON value, starting at `$`.
    pub path: String,

    /// What was wrong with it.
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(path: impl Into<String>, message: impl Into<String>) -> ValidationError {
        ValidationError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Crate-specific error enum.
#[derive(Debug, Error)]
pub enum Error {
    /// [geozero::error::GeozeroError]
    #[error(transparent)]
    Geozero(#[from] geozero::error::GeozeroError),

    /// Invalid CQL2 text
    #[error("invalid cql2-text: {0}")]
    InvalidCql2Text(String),

    /// A timestamp without the trailing `Z`, or a malformed date.
    #[error("invalid {kind} literal: {value}")]
    InvalidInstant {
        /// Either `"date"` or `"timestamp"`.
        kind: &'static str,

        /// The offending literal.
        value: String,
    },

    /// A bounding box with a length other than 4 or 6.
    #[error("bbox must have 4 or 6 values, got {0}")]
    InvalidBbox(usize),

    /// A numeric literal that does not fit a JSON number, e.g. an
    /// overflowing exponent.
    #[error("invalid numeric literal: {0}")]
    InvalidNumber(String),

    /// Invalid number of arguments for the expression
    #[error("invalid number of arguments for {name}: {actual} (expected {expected})")]
    InvalidNumberOfArguments {
        /// The name of the expression or operation
        name: String,

        /// The actual number of arguments
        actual: usize,

        /// The number of arguments the expression or operation expected
        expected: usize,
    },

    /// [jiff::Error]
    #[error(transparent)]
    Jiff(#[from] jiff::Error),

    /// Missing argument from a function that requires one.
    #[error("function {0} is missing a required argument")]
    MissingArgument(&'static str),

    /// [std::num::ParseFloatError]
    #[error(transparent)]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// [std::num::ParseIntError]
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),

    /// [pest::error::Error]
    #[error(transparent)]
    Pest(#[from] Box<pest::error::Error<crate::Rule>>),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// The parse tree held something other than what the surrounding
    /// clause requires.
    #[error("expected {expected}, found {found}")]
    Unexpected {
        /// What the clause requires.
        expected: &'static str,

        /// What was there instead.
        found: String,
    },

    /// A cql2-json validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
