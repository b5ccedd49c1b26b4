use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid switch name: {0}")]
    InvalidSwitchName(String),

    #[error("Invalid state value: {0}")]
    InvalidStateValue(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
