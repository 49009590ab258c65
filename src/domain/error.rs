use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// The requested correction index is not part of the registry.
    InvalidIndex { code: String, valid: String },
    /// Transport or HTTP-status failure, straight from reqwest.
    Request(reqwest::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidIndex { code, valid } => {
                write!(f, "{} is not a valid index. Use one of: {}", code, valid)
            }
            AppError::Request(err) => write!(f, "Request error: {}", err),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Request(err) => Some(err),
            AppError::InvalidIndex { .. } => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Request(err)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
