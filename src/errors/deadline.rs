// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Timeout and cancellation errors.

/// A call was abandoned before it completed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeadlineError {
    /// The request deadline passed while the call was in flight.
    #[error("{operation} timed out")]
    TimedOut {
        /// The operation that was abandoned
        operation: &'static str,
    },

    /// The request (or the whole server) was cancelled.
    #[error("{operation} was cancelled")]
    Cancelled {
        /// The operation that was abandoned
        operation: &'static str,
    },
}

impl DeadlineError {
    /// `"timed_out"` or `"cancelled"`, for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DeadlineError::TimedOut { .. } => "timed_out",
            DeadlineError::Cancelled { .. } => "cancelled",
        }
    }
}
