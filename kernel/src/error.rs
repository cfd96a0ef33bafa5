use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    /// A required payload or identifier is missing, or a field is out of range.
    InvalidInput,
    /// An update payload cannot be applied as given.
    InvalidRequest,
    NotFound,
    StorageFailure,
    /// Failures outside the stores, such as binding the listen socket.
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InvalidInput => write!(f, "Invalid input"),
            KernelError::InvalidRequest => write!(f, "Invalid update request"),
            KernelError::NotFound => write!(f, "Requested entity was not found"),
            KernelError::StorageFailure => write!(f, "Storage failure"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
