// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Validation engines: classification, file integrity, revision sequencing and
//! collection aggregation.

pub mod aggregate;
pub mod classifier;
pub mod integrity;
pub mod observer;
pub mod revision;
mod suggestions;

pub use aggregate::{CollectionValidator, SelfValidatable, ValidationContext, validate_collection};
pub use classifier::ContentClassifier;
pub use integrity::FileIntegrityValidator;
pub use observer::{TracingObserver, ValidationObserver};
pub use revision::{
    RevisionDiagnosis, check_sequence, diagnose_revision_number, is_valid_next_number,
    is_valid_temporal_pair, next_number, validate_temporal_pair,
};
