// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Core error types.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by core type conversions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A role name outside the closed role set.
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

impl CoreError {
    /// Creates an unknown role error.
    pub fn unknown_role(name: impl Into<String>) -> Self {
        Self::UnknownRole(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::unknown_role("Sommelier");
        assert_eq!(err.to_string(), "Unknown role: Sommelier");
    }
}
