// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Integrity and validation checks for legal document uploads.
//!
//! - [`ContentClassifier`] identifies a file's real type from its bytes.
//! - [`FileIntegrityValidator`] checks claimed metadata, content and checksum,
//!   and proposes alternative file names.
//! - [`logic::revision`] enforces contiguous revision numbers and date ordering.
//! - [`CollectionValidator`] shapes nested results into field-scoped paths.

pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod utils;

pub use error::ContractError;
pub use logic::{
    CollectionValidator, ContentClassifier, FileIntegrityValidator, SelfValidatable,
    TracingObserver, ValidationContext, ValidationObserver,
};
pub use models::{AllowList, FileSubmission, ValidationOutcome, ValidationResult};
