// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Audit hook invoked after every file validation.

use tracing::{info, warn};

use crate::models::{FileSubmission, ValidationOutcome};

/// Observes validation calls for audit and diagnostics.
///
/// Observers see the finished outcome and cannot change it.
pub trait ValidationObserver: Send + Sync {
    fn file_validated(&self, submission: &FileSubmission<'_>, outcome: &ValidationOutcome);
}

/// Emits one structured `tracing` event per validated file.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl ValidationObserver for TracingObserver {
    fn file_validated(&self, submission: &FileSubmission<'_>, outcome: &ValidationOutcome) {
        let detected = outcome.detection().map(|d| d.mime_type);
        if outcome.is_valid() {
            info!(
                file_name = submission.file_name,
                size = submission.size,
                mime = submission.mime_type,
                detected,
                warnings = outcome.warnings().len(),
                "file accepted"
            );
        } else {
            warn!(
                file_name = submission.file_name,
                size = submission.size,
                mime = submission.mime_type,
                detected,
                errors = ?outcome.error_messages(),
                warnings = outcome.warnings().len(),
                "file rejected"
            );
        }
    }
}
