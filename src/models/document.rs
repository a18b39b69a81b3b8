// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Owned document DTOs that plug into collection validation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ContractError;
use crate::logic::aggregate::{CollectionValidator, SelfValidatable, ValidationContext};
use crate::logic::integrity::FileIntegrityValidator;
use crate::logic::revision::{span_from_days, validate_revision_number, validate_temporal_pair};
use crate::models::{FileSubmission, ValidationResult};

/// Context key holding the revision numbers already stored for a document.
pub const EXISTING_REVISION_NUMBERS: &str = "existingRevisionNumbers";
/// Context key overriding the creation/modification span, in whole days.
pub const MAX_SPAN_DAYS: &str = "maxSpanDays";

/// An uploaded file as received by an API layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFile {
    pub file_name: String,
    pub extension: String,
    pub size: u64,
    pub mime_type: String,
    pub checksum: String,
    #[serde(skip)]
    pub content: Option<Vec<u8>>,
}

impl DocumentFile {
    pub fn as_submission(&self) -> FileSubmission<'_> {
        let submission = FileSubmission::new(
            &self.file_name,
            &self.extension,
            self.size,
            &self.mime_type,
            &self.checksum,
        );
        match &self.content {
            Some(bytes) => submission.with_bytes(bytes),
            None => submission,
        }
    }

    /// Pair this file with `validator` so collection validation uses its
    /// allow-list and observer instead of the standard ones.
    pub fn checked_with<'a>(&'a self, validator: &'a FileIntegrityValidator) -> CheckedFile<'a> {
        CheckedFile {
            file: self,
            validator,
        }
    }
}

/// Validates against the standard allow-list.
impl SelfValidatable for DocumentFile {
    fn validate(&self, context: &ValidationContext) -> Vec<ValidationResult> {
        self.checked_with(&FileIntegrityValidator::default()).validate(context)
    }
}

/// A [`DocumentFile`] bound to the validator that should check it.
#[derive(Clone, Copy)]
pub struct CheckedFile<'a> {
    pub file: &'a DocumentFile,
    pub validator: &'a FileIntegrityValidator,
}

impl SelfValidatable for CheckedFile<'_> {
    fn validate(&self, _context: &ValidationContext) -> Vec<ValidationResult> {
        self.validator
            .validate(&self.file.as_submission())
            .into_validation_results()
    }
}

impl FileIntegrityValidator {
    /// Validate a collection of files under `property` with this validator.
    pub fn validate_files(
        &self,
        files: Option<&[Option<DocumentFile>]>,
        property: &str,
    ) -> Result<Vec<ValidationResult>, ContractError> {
        let validator = CollectionValidator::new(property)?;
        let checked: Option<Vec<Option<CheckedFile<'_>>>> = files.map(|files| {
            files
                .iter()
                .map(|file| file.as_ref().map(|file| file.checked_with(self)))
                .collect()
        });
        Ok(validator.validate(checked.as_deref()))
    }
}

/// Revision number and timestamps of one document revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionStamp {
    pub revision_number: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub creation_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub modification_date: OffsetDateTime,
}

impl SelfValidatable for RevisionStamp {
    /// Dates are always checked; sequencing only when the context lists existing numbers.
    fn validate(&self, context: &ValidationContext) -> Vec<ValidationResult> {
        let mut results = Vec::new();

        if let Some(existing) = context
            .item(EXISTING_REVISION_NUMBERS)
            .and_then(|value| value.as_array())
        {
            let existing: Vec<i64> = existing.iter().filter_map(|n| n.as_i64()).collect();
            results.extend(validate_revision_number(self.revision_number, &existing));
        }

        let max_span = match context.item(MAX_SPAN_DAYS) {
            None => None,
            Some(value) => {
                let span = value.as_i64().and_then(span_from_days);
                if span.is_none() {
                    results.push(ValidationResult::new(
                        format!("Maximum span of {value} days is out of range."),
                        MAX_SPAN_DAYS,
                    ));
                }
                span
            }
        };
        results.extend(validate_temporal_pair(
            self.creation_date,
            self.modification_date,
            max_span,
        ));
        results
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use time::macros::datetime;

    use super::*;
    use crate::logic::observer::ValidationObserver;
    use crate::models::{AllowList, ValidationOutcome};
    use crate::utils::hash::hash_bytes;

    fn stamp(revision_number: i64) -> RevisionStamp {
        RevisionStamp {
            revision_number,
            creation_date: datetime!(2024-01-01 9:00 UTC),
            modification_date: datetime!(2024-01-02 9:00 UTC),
        }
    }

    #[test]
    fn revision_stamp_uses_existing_numbers_from_context() {
        let context = ValidationContext::new()
            .with_item(EXISTING_REVISION_NUMBERS, vec![1, 2, 3]);
        assert!(stamp(4).validate(&context).is_empty());

        let results = stamp(5).validate(&context);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].field_path, vec!["revisionNumber"]);

        // Without a history only the dates are checked.
        assert!(stamp(5).validate(&ValidationContext::new()).is_empty());
    }

    #[test]
    fn revision_stamp_honours_span_override() {
        let context = ValidationContext::new().with_item(MAX_SPAN_DAYS, 0);
        let results = stamp(1).validate(&context);
        assert_eq!(results[0].field_path, vec!["modificationDate"]);
    }

    // An unrepresentable span is reported; the default span still applies.
    #[test]
    fn revision_stamp_reports_out_of_range_span() {
        let context = ValidationContext::new().with_item(MAX_SPAN_DAYS, i64::MAX);
        assert_eq!(
            stamp(1).validate(&context),
            vec![ValidationResult::new(
                format!("Maximum span of {} days is out of range.", i64::MAX),
                MAX_SPAN_DAYS
            )]
        );

        let context = ValidationContext::new().with_item(MAX_SPAN_DAYS, "ten");
        assert_eq!(stamp(1).validate(&context)[0].field_path, vec![MAX_SPAN_DAYS]);
    }

    #[test]
    fn revision_stamp_reads_rfc3339_json() {
        let stamp: RevisionStamp = serde_json::from_str(
            r#"{"revisionNumber":2,"creationDate":"2024-01-01T09:00:00+01:00","modificationDate":"2024-01-01T08:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(stamp.revision_number, 2);
        assert!(stamp.validate(&ValidationContext::new()).is_empty());
    }

    // File errors surface with collection-qualified paths.
    #[test]
    fn document_files_validate_inside_collections() {
        let content = b"%PDF-1.7\n".to_vec();
        let good = DocumentFile {
            file_name: "motion.pdf".into(),
            extension: ".pdf".into(),
            size: content.len() as u64,
            mime_type: "application/pdf".into(),
            checksum: hash_bytes(&content),
            content: Some(content),
        };
        let bad = DocumentFile {
            extension: ".exe".into(),
            content: None,
            ..good.clone()
        };

        let files = [Some(good), Some(bad)];
        let results = CollectionValidator::new("files")
            .unwrap()
            .validate(Some(&files[..]));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].field_path, vec!["files[1].extension"]);
    }

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl ValidationObserver for Counting {
        fn file_validated(&self, _submission: &FileSubmission<'_>, _outcome: &ValidationOutcome) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    // Nested files are checked with the caller's allow-list and observer.
    #[test]
    fn validate_files_uses_the_callers_validator() {
        let content = b"%PDF-1.7\n".to_vec();
        let file = DocumentFile {
            file_name: "motion.pdf".into(),
            extension: ".pdf".into(),
            size: content.len() as u64,
            mime_type: "application/pdf".into(),
            checksum: hash_bytes(&content),
            content: Some(content),
        };
        let counting = Arc::new(Counting::default());
        let allow_list = AllowList::from_json_str(
            r#"{"extensions": [".txt"], "mime_types": ["text/plain"]}"#,
        )
        .unwrap();
        let validator =
            FileIntegrityValidator::new(Arc::new(allow_list)).with_observer(counting.clone());

        let files = [None, Some(file.clone())];
        let results = validator.validate_files(Some(&files[..]), "files").unwrap();
        let paths: Vec<&str> = results.iter().map(|r| r.field_path[0].as_str()).collect();
        assert_eq!(
            paths,
            vec!["files[0]", "files[1].extension", "files[1].mimeType", "files[1].content"]
        );
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);

        // The plain DTO keeps using the standard list.
        let standard = CollectionValidator::new("files")
            .unwrap()
            .validate(Some(&[Some(file)][..]));
        assert!(standard.is_empty());

        assert!(validator.validate_files(None, " ").is_err());
    }
}
