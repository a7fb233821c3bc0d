use std::fmt;

#[derive(Debug)]
pub enum MemdevError {
    /// A boundary-crossing copy could not complete. Short transfers are
    /// reported through return counts, not this kind.
    TransferFault(String),
    /// Malformed textual input to a parameter setter.
    Parse(String),
    /// Operation attempted outside its valid session state.
    InvalidState(&'static str),
    PoisonedLock,
}

impl fmt::Display for MemdevError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemdevError::TransferFault(s) => write!(f, "Transfer fault: {}", s),
            MemdevError::Parse(s) => write!(f, "Parse error: invalid integer input {:?}", s),
            MemdevError::InvalidState(s) => write!(f, "Invalid state: {}", s),
            MemdevError::PoisonedLock => write!(f, "Device mutex was poisoned"),
        }
    }
}

impl std::error::Error for MemdevError {}

impl<T> From<std::sync::PoisonError<T>> for MemdevError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        MemdevError::PoisonedLock
    }
}
