use thiserror::Error as ThisError;

/// Failures raised by the calculator functions themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("{operation} overflowed the decimal range")]
    Overflow { operation: &'static str },
}

#[derive(Debug, ThisError)]
#[error("{description}")]
pub struct SimpleStringError {
    description: String,
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("calculator failed while computing record {index}: {error}")]
    Calc { index: usize, error: CalcError },
    #[error("unable to encode records: {error}")]
    Json {
        #[from]
        error: serde_json::Error,
    },
    #[error("io error: {error}")]
    IO {
        #[from]
        error: std::io::Error,
    },
    #[error(transparent)]
    SimpleString {
        #[from]
        error: SimpleStringError,
    },
}

impl From<String> for Error {
    fn from(description: String) -> Self {
        Error::SimpleString {
            error: SimpleStringError { description },
        }
    }
}
