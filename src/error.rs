use serde::Serialize;
use thiserror::Error;

/// Reasons an upload can fail to produce a dataset.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot decode {filename:?}: {reason}")]
    Decode { filename: String, reason: String },

    #[error("no usable rows in {0:?}")]
    EmptyResult(String),
}

impl ParseError {
    pub(crate) fn decode(
        filename: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        ParseError::Decode {
            filename: filename.into(),
            reason: reason.to_string(),
        }
    }
}

/// Dataset lookups and deletions that could not be carried out.
///
/// The messages are meant to be shown to the user as is.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RegistryError {
    #[error("Can not find this database: {0}")]
    NotFound(String),

    #[error("Please type the name of database.")]
    InvalidRequest,

    #[error("There is no saved database, please upload one")]
    Empty,
}
