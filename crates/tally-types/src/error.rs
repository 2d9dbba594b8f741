use thiserror::Error;

/// Errors produced when a record fails its own consistency checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("value delta does not match old and new values")]
    DeltaMismatch,
}
