use std::io;
use std::result;

use teloxide::RequestError;
use thiserror::Error as ThisError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Clone, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error("{0}")]
    Telegram(String),
    #[error("{0}")]
    Storage(String),
    #[error("{0}")]
    Giveaway(String),
}

impl From<RequestError> for Error {
    fn from(err: RequestError) -> Error {
        let description = err.to_string();
        Error::Telegram(description)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        let description = err.to_string();
        Error::Storage(description)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        let description = err.to_string();
        Error::Storage(description)
    }
}
