// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Inputs and results of a file integrity check.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::models::signature::Detection;
use crate::models::validation_result::ValidationResult;

/// Claimed metadata for one upload, optionally with the bytes already read by the caller.
#[derive(Clone, Copy, Debug)]
pub struct FileSubmission<'a> {
    pub file_name: &'a str,
    /// Extension with or without the leading dot.
    pub extension: &'a str,
    /// Claimed size in bytes.
    pub size: u64,
    pub mime_type: &'a str,
    /// Claimed SHA-256 digest as hex.
    pub checksum: &'a str,
    pub bytes: Option<&'a [u8]>,
}

impl<'a> FileSubmission<'a> {
    pub fn new(
        file_name: &'a str,
        extension: &'a str,
        size: u64,
        mime_type: &'a str,
        checksum: &'a str,
    ) -> Self {
        Self {
            file_name,
            extension,
            size,
            mime_type,
            checksum,
            bytes: None,
        }
    }

    /// Attach the raw content so it can be cross-checked against the claims.
    pub fn with_bytes(mut self, bytes: &'a [u8]) -> Self {
        self.bytes = Some(bytes);
        self
    }
}

/// Normalized echo of the submitted metadata.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub file_name: String,
    pub extension: String,
    pub size: u64,
    pub mime_type: String,
    pub checksum: String,
}

/// Result of validating one [`FileSubmission`].
///
/// The outcome is valid exactly when no error was recorded; warnings never
/// affect validity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: Vec<ValidationResult>,
    warnings: Vec<String>,
    metadata: FileMetadata,
    detection: Option<Detection>,
}

impl ValidationOutcome {
    pub(crate) fn new(metadata: FileMetadata) -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            metadata,
            detection: None,
        }
    }

    pub(crate) fn push_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationResult::new(message, field));
    }

    pub(crate) fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub(crate) fn set_detection(&mut self, detection: Detection) {
        self.detection = Some(detection);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error messages in the order the checks ran.
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Errors with the field each one concerns.
    pub fn errors(&self) -> &[ValidationResult] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    /// Content type found in the bytes, when bytes were supplied and recognized.
    pub fn detection(&self) -> Option<&Detection> {
        self.detection.as_ref()
    }

    /// Field-scoped errors for DTO-style reporting. Warnings are not violations and are dropped.
    pub fn into_validation_results(self) -> Vec<ValidationResult> {
        self.errors
    }
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationOutcome", 5)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.error_messages())?;
        state.serialize_field("warnings", &self.warnings)?;
        state.serialize_field("metadata", &self.metadata)?;
        state.serialize_field("detection", &self.detection)?;
        state.end()
    }
}
