// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Caller-side contract violations.
//!
//! Data problems are never reported here; they come back as
//! [`crate::models::ValidationResult`] entries or outcome errors.

/// Misuse of the engine API that indicates a bug in the calling code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("collection property name must not be empty")]
    EmptyPropertyName,
    #[error("allow-list {list} contains an empty entry")]
    EmptyAllowListEntry { list: &'static str },
}
