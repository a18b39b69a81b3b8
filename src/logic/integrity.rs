// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! File integrity validation: claimed metadata checked against the allow-list
//! and, when bytes are supplied, against the content itself.
//!
//! Every check runs on every call so one round-trip reports everything wrong
//! with an upload. Type mismatches between claim and content are warnings;
//! unreadable content, digest and length mismatches are errors.

use std::sync::Arc;

use crate::config::{
    MAX_EXTENSION_LENGTH, MAX_FILE_NAME_LENGTH, MAX_FILE_SIZE, MIN_EXTENSION_LENGTH,
    MIN_FILE_NAME_LENGTH, MIN_FILE_SIZE,
};
use crate::logic::classifier::ContentClassifier;
use crate::logic::observer::ValidationObserver;
use crate::models::{
    AllowList, Classification, Confidence, FileMetadata, FileSubmission, ValidationOutcome,
};
use crate::utils::hash::{digests_match, hash_bytes, is_sha256_hex};
use crate::utils::mime::extension_maps_to;
use crate::utils::normalize::{
    is_mime_shape, normalize_extension, normalize_mime_type, split_file_name,
};

/// Characters that are legal on some file systems but break shells, URLs or Windows.
pub const PROBLEMATIC_CHARACTERS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

pub const FIELD_FILE_NAME: &str = "fileName";
pub const FIELD_EXTENSION: &str = "extension";
pub const FIELD_SIZE: &str = "size";
pub const FIELD_MIME_TYPE: &str = "mimeType";
pub const FIELD_CHECKSUM: &str = "checksum";
pub const FIELD_CONTENT: &str = "content";

/// Decides whether an upload is safe and consistent enough to store.
///
/// Cheap to clone; the allow-list is shared behind an [`Arc`].
#[derive(Clone)]
pub struct FileIntegrityValidator {
    allow_list: Arc<AllowList>,
    classifier: ContentClassifier,
    observer: Option<Arc<dyn ValidationObserver>>,
}

impl Default for FileIntegrityValidator {
    fn default() -> Self {
        Self::new(AllowList::shared_standard())
    }
}

impl FileIntegrityValidator {
    pub fn new(allow_list: Arc<AllowList>) -> Self {
        Self {
            allow_list,
            classifier: ContentClassifier::default(),
            observer: None,
        }
    }

    pub fn with_classifier(mut self, classifier: ContentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Attach an audit observer; it sees every outcome but never changes one.
    pub fn with_observer(mut self, observer: Arc<dyn ValidationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Run every check against `submission` and collect all errors and warnings.
    pub fn validate(&self, submission: &FileSubmission<'_>) -> ValidationOutcome {
        let metadata = FileMetadata {
            file_name: submission.file_name.trim().to_string(),
            extension: normalize_extension(submission.extension),
            size: submission.size,
            mime_type: normalize_mime_type(submission.mime_type),
            checksum: submission.checksum.trim().to_ascii_lowercase(),
        };
        let mut outcome = ValidationOutcome::new(metadata.clone());

        for message in self.file_name_errors(submission.file_name) {
            outcome.push_error(FIELD_FILE_NAME, message);
        }
        self.check_extension(&mut outcome, &metadata);
        check_size(&mut outcome, metadata.size);
        self.check_mime_type(&mut outcome, &metadata.mime_type);
        if !is_sha256_hex(&metadata.checksum) {
            outcome.push_error(
                FIELD_CHECKSUM,
                "Checksum must be a 64-character hexadecimal SHA-256 digest.",
            );
        }
        if let Some(bytes) = submission.bytes {
            self.check_content(&mut outcome, &metadata, bytes);
        }

        if let Some(observer) = &self.observer {
            observer.file_validated(submission, &outcome);
        }
        outcome
    }

    /// Problems with a file name, in check order. Empty when the name is acceptable.
    pub fn file_name_errors(&self, file_name: &str) -> Vec<String> {
        if file_name.trim().is_empty() {
            return vec!["File name is required.".to_string()];
        }

        let mut errors = Vec::new();
        let length = file_name.chars().count();
        if !(MIN_FILE_NAME_LENGTH..=MAX_FILE_NAME_LENGTH).contains(&length) {
            errors.push(format!(
                "File name must be between {MIN_FILE_NAME_LENGTH} and {MAX_FILE_NAME_LENGTH} characters long (got {length})."
            ));
        }
        if file_name.chars().any(is_os_invalid) {
            errors.push(
                "File name contains control characters or path separators.".to_string(),
            );
        }

        let mut found: Vec<char> = Vec::new();
        for ch in file_name.chars().filter(|c| PROBLEMATIC_CHARACTERS.contains(c)) {
            if !found.contains(&ch) {
                found.push(ch);
            }
        }
        if !found.is_empty() {
            let listed: Vec<String> = found.iter().map(char::to_string).collect();
            errors.push(format!(
                "File name contains problematic characters: {}",
                listed.join(" ")
            ));
        }

        if file_name.ends_with('.') || file_name.ends_with(' ') {
            errors.push("File name must not end with a dot or a space.".to_string());
        }

        let (base, _) = split_file_name(file_name.trim());
        if self.allow_list.is_reserved_name(base) {
            errors.push(format!(
                "File name '{base}' is reserved by the operating system."
            ));
        }

        errors
    }

    pub fn is_valid_file_name(&self, file_name: &str) -> bool {
        self.file_name_errors(file_name).is_empty()
    }

    fn check_extension(&self, outcome: &mut ValidationOutcome, metadata: &FileMetadata) {
        let extension = &metadata.extension;
        if extension.is_empty() {
            outcome.push_error(FIELD_EXTENSION, "File extension is required.");
            return;
        }

        let length = extension.chars().count() - 1;
        if !(MIN_EXTENSION_LENGTH..=MAX_EXTENSION_LENGTH).contains(&length) {
            outcome.push_error(
                FIELD_EXTENSION,
                format!(
                    "File extension must be between {MIN_EXTENSION_LENGTH} and {MAX_EXTENSION_LENGTH} characters long."
                ),
            );
        }
        if !self.allow_list.allows_extension(extension) {
            outcome.push_error(
                FIELD_EXTENSION,
                format!("File extension '{extension}' is not allowed."),
            );
        }

        if let (_, Some(name_extension)) = split_file_name(&metadata.file_name) {
            let name_extension = normalize_extension(name_extension);
            if &name_extension != extension {
                outcome.push_warning(format!(
                    "File name extension '{name_extension}' does not match the declared extension '{extension}'."
                ));
            }
        }
    }

    fn check_mime_type(&self, outcome: &mut ValidationOutcome, mime_type: &str) {
        if mime_type.is_empty() {
            outcome.push_error(FIELD_MIME_TYPE, "MIME type is required.");
        } else if !is_mime_shape(mime_type) {
            outcome.push_error(
                FIELD_MIME_TYPE,
                format!("MIME type '{mime_type}' is not of the form type/subtype."),
            );
        } else if !self.allow_list.allows_mime_type(mime_type) {
            outcome.push_error(
                FIELD_MIME_TYPE,
                format!("MIME type '{mime_type}' is not allowed."),
            );
        }
    }

    fn check_content(&self, outcome: &mut ValidationOutcome, metadata: &FileMetadata, bytes: &[u8]) {
        match self.classifier.classify(bytes) {
            Classification::Unrecognized { preview_hex } => {
                outcome.push_error(
                    FIELD_CONTENT,
                    format!(
                        "File content does not match any supported file signature (leading bytes: {preview_hex})."
                    ),
                );
            }
            Classification::Recognized(detection) => {
                outcome.set_detection(detection);
                if !self.allow_list.allows_mime_type(detection.mime_type) {
                    outcome.push_error(
                        FIELD_CONTENT,
                        format!(
                            "Detected content type '{}' is not allowed.",
                            detection.mime_type
                        ),
                    );
                }
                if !metadata.mime_type.is_empty() && metadata.mime_type != detection.mime_type {
                    outcome.push_warning(format!(
                        "Declared MIME type '{}' does not match detected content type '{}'.",
                        metadata.mime_type, detection.mime_type
                    ));
                }
                if !metadata.extension.is_empty()
                    && metadata.extension != detection.extension
                    && !extension_maps_to(&metadata.extension, detection.mime_type)
                {
                    outcome.push_warning(format!(
                        "Declared extension '{}' does not match detected content extension '{}'.",
                        metadata.extension, detection.extension
                    ));
                }
                if detection.confidence == Confidence::Low {
                    outcome.push_warning(format!(
                        "Content type '{}' was inferred heuristically and may be inaccurate.",
                        detection.mime_type
                    ));
                }
            }
        }

        let actual = hash_bytes(bytes);
        if !digests_match(&metadata.checksum, &actual) {
            outcome.push_error(
                FIELD_CHECKSUM,
                format!(
                    "Checksum mismatch: declared {}, computed {actual}.",
                    metadata.checksum
                ),
            );
        }

        let actual_size = bytes.len() as u64;
        if actual_size != metadata.size {
            outcome.push_error(
                FIELD_SIZE,
                format!(
                    "Declared size {} bytes does not match actual content length {actual_size} bytes.",
                    metadata.size
                ),
            );
        }
    }
}

fn check_size(outcome: &mut ValidationOutcome, size: u64) {
    if size < MIN_FILE_SIZE {
        outcome.push_error(FIELD_SIZE, "File is empty.");
    } else if size > MAX_FILE_SIZE {
        outcome.push_error(
            FIELD_SIZE,
            format!("File size {size} bytes exceeds the maximum of {MAX_FILE_SIZE} bytes."),
        );
    }
}

/// Control characters and path separators are rejected by at least one target file system.
fn is_os_invalid(ch: char) -> bool {
    ch.is_control() || ch == '/' || ch == '\\'
}
