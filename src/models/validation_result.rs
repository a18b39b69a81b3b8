// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Field-scoped violation record shared by every validator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One violation plus the path of the member it concerns.
///
/// Paths are dotted/bracketed segments such as `files[2].checksum`, so a UI can
/// bind the message to the exact input that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub message: String,
    pub field_path: Vec<String>,
}

impl ValidationResult {
    pub fn new(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_path: vec![field.into()],
        }
    }

    /// Violation that concerns the object as a whole.
    pub fn without_field(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_path: Vec::new(),
        }
    }

    /// Rewrite every member path under `prefix`; an empty path becomes `prefix` itself.
    pub fn prefixed(mut self, prefix: &str) -> Self {
        if self.field_path.is_empty() {
            self.field_path.push(prefix.to_string());
        } else {
            for member in &mut self.field_path {
                *member = format!("{prefix}.{member}");
            }
        }
        self
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field_path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field_path.join(", "), self.message)
        }
    }
}
