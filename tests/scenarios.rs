// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! End-to-end behaviour of the public API.

use std::sync::Arc;
use std::thread;

use time::{Duration, OffsetDateTime};

use docintegrity::logic::revision::{is_valid_next_number, is_valid_temporal_pair, next_number};
use docintegrity::models::{DocumentFile, RevisionStamp};
use docintegrity::utils::hash_bytes;
use docintegrity::{
    CollectionValidator, FileIntegrityValidator, FileSubmission, ValidationContext,
};

fn pdf_content() -> Vec<u8> {
    let mut bytes = b"%PDF-1.7\n".to_vec();
    bytes.resize(2048, b'\n');
    bytes
}

#[test]
fn matching_pdf_is_valid_without_warnings() {
    let bytes = pdf_content();
    let checksum = hash_bytes(&bytes);
    let outcome = FileIntegrityValidator::default().validate(
        &FileSubmission::new("report.pdf", ".pdf", 2048, "application/pdf", &checksum)
            .with_bytes(&bytes),
    );

    assert!(outcome.is_valid(), "{:?}", outcome.error_messages());
    assert!(outcome.warnings().is_empty(), "{:?}", outcome.warnings());
}

#[test]
fn disallowed_extension_is_the_only_error() {
    let bytes = pdf_content();
    let checksum = hash_bytes(&bytes);
    let outcome = FileIntegrityValidator::default().validate(
        &FileSubmission::new("report.pdf", ".exe", 2048, "application/pdf", &checksum)
            .with_bytes(&bytes),
    );

    assert!(!outcome.is_valid());
    assert_eq!(
        outcome.error_messages(),
        vec!["File extension '.exe' is not allowed."]
    );
}

// Spoofed MIME claims are surfaced without rejecting the upload.
#[test]
fn jpeg_claimed_as_pdf_warns_once() {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
    bytes.extend_from_slice(b"Exif");
    let checksum = hash_bytes(&bytes);
    let outcome = FileIntegrityValidator::default().validate(
        &FileSubmission::new(
            "exhibit.jpg",
            ".jpg",
            bytes.len() as u64,
            "application/pdf",
            &checksum,
        )
        .with_bytes(&bytes),
    );

    assert!(outcome.is_valid());
    assert_eq!(
        outcome.warnings(),
        &["Declared MIME type 'application/pdf' does not match detected content type 'image/jpeg'."]
    );
    assert_eq!(outcome.detection().map(|d| d.mime_type), Some("image/jpeg"));
}

#[test]
fn tampered_content_fails_the_checksum() {
    let bytes = pdf_content();
    let checksum = hash_bytes(b"the original upload");
    let outcome = FileIntegrityValidator::default().validate(
        &FileSubmission::new("report.pdf", ".pdf", 2048, "application/pdf", &checksum)
            .with_bytes(&bytes),
    );

    assert!(!outcome.is_valid());
    assert_eq!(outcome.errors().len(), 1);
    assert!(outcome.error_messages()[0].starts_with("Checksum mismatch"));
    assert_eq!(outcome.errors()[0].field_path, vec!["checksum"]);
}

#[test]
fn skipped_revision_is_rejected() {
    assert!(!is_valid_next_number(5, &[1, 2, 3]));
    assert_eq!(next_number(&[1, 2, 3]), 4);
}

#[test]
fn modification_before_creation_is_rejected() {
    let now = OffsetDateTime::now_utc();
    assert!(!is_valid_temporal_pair(now, now - Duration::hours(1), None));
}

#[test]
fn revalidation_yields_identical_outcomes() {
    let bytes = pdf_content();
    let checksum = hash_bytes(&bytes);
    let validator = FileIntegrityValidator::default();
    let submission =
        FileSubmission::new("report?.pdf", "PDF", 2048, "Application/PDF", &checksum)
            .with_bytes(&bytes);

    assert_eq!(validator.validate(&submission), validator.validate(&submission));
}

// One validator instance serves many threads.
#[test]
fn validator_is_shareable_across_threads() {
    let validator = Arc::new(FileIntegrityValidator::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let bytes = format!("%PDF-1.{i}\n").into_bytes();
                let checksum = hash_bytes(&bytes);
                let name = format!("brief-{i}.pdf");
                validator
                    .validate(
                        &FileSubmission::new(
                            &name,
                            ".pdf",
                            bytes.len() as u64,
                            "application/pdf",
                            &checksum,
                        )
                        .with_bytes(&bytes),
                    )
                    .is_valid()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn nested_documents_report_qualified_paths() {
    let content = pdf_content();
    let file = DocumentFile {
        file_name: "motion.pdf".into(),
        extension: ".pdf".into(),
        size: 2048,
        mime_type: "application/pdf".into(),
        checksum: hash_bytes(&content),
        content: Some(content),
    };
    let files = [Some(file), None];
    let results = CollectionValidator::new("files")
        .unwrap()
        .non_empty()
        .validate(Some(&files[..]));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].field_path, vec!["files[1]"]);

    let now = OffsetDateTime::now_utc();
    let stamps = [
        Some(RevisionStamp {
            revision_number: 4,
            creation_date: now - Duration::days(2),
            modification_date: now - Duration::days(1),
        }),
        Some(RevisionStamp {
            revision_number: 6,
            creation_date: now - Duration::days(1),
            modification_date: now - Duration::days(2),
        }),
    ];
    let parent = ValidationContext::new().with_item("existingRevisionNumbers", vec![1, 2, 3]);
    let results = CollectionValidator::new("revisions")
        .unwrap()
        .with_parent(&parent)
        .validate(Some(&stamps[..]));
    let paths: Vec<&str> = results.iter().map(|r| r.field_path[0].as_str()).collect();
    assert_eq!(
        paths,
        vec!["revisions[1].revisionNumber", "revisions[1].modificationDate"]
    );
}
