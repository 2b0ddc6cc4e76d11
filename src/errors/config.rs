// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration errors.

/// Errors raised while reading the service configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing required environment variable {name}")]
    Missing {
        /// Variable name (the first accepted alias)
        name: &'static str,
    },

    /// A variable is set but cannot be parsed.
    #[error("Invalid value {value:?} for {name}: {reason}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// The offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

impl ConfigError {
    /// Helper to create an `Invalid` error.
    pub fn invalid(name: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            name,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
