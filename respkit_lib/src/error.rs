//! Error types for the service layer.

use std::fmt;

/// Errors produced outside the envelope channel: bad caller input and seed
/// loading failures.
#[derive(Debug)]
pub enum ServiceError {
    /// Seed data could not be loaded.
    Seed(crate::seed::SeedError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seed(e) => write!(f, "Seed error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Seed(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<crate::seed::SeedError> for ServiceError {
    fn from(e: crate::seed::SeedError) -> Self {
        Self::Seed(e)
    }
}
