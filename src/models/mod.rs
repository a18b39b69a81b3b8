// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types shared by the validators and the command line.

pub mod allow_list;
pub mod document;
pub mod outcome;
pub mod signature;
pub mod validation_result;

pub use allow_list::AllowList;
pub use document::{CheckedFile, DocumentFile, RevisionStamp};
pub use outcome::{FileMetadata, FileSubmission, ValidationOutcome};
pub use signature::{Classification, Confidence, Detection, FileSignature};
pub use validation_result::ValidationResult;
