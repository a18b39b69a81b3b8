// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Fixed limits shared by every validator.
//!
//! These are compile-time constants rather than runtime settings: a deployment
//! that needs a different allow-list loads one at startup (see
//! [`crate::models::AllowList::from_json_str`]), but the numeric bounds below
//! are part of the storage contract and never change at runtime.

use time::macros::datetime;
use time::{Duration, OffsetDateTime};

/// Longest accepted file name, in characters.
pub const MAX_FILE_NAME_LENGTH: usize = 128;
/// Shortest accepted file name, in characters.
pub const MIN_FILE_NAME_LENGTH: usize = 1;

/// Longest extension accepted, excluding the leading dot.
pub const MAX_EXTENSION_LENGTH: usize = 5;
/// Shortest extension accepted, excluding the leading dot.
pub const MIN_EXTENSION_LENGTH: usize = 1;

/// Largest accepted upload (100 MiB).
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
/// Smallest accepted upload; empty files are rejected.
pub const MIN_FILE_SIZE: u64 = 1;

/// Length of a SHA-256 digest rendered as hex.
pub const SHA256_HEX_LENGTH: usize = 64;

/// Upper bound on name suggestions returned in one call.
pub const MAX_SUGGESTIONS: usize = 10;

/// Lowest legal revision number.
pub const MIN_REVISION_NUMBER: i64 = 1;
/// Highest legal revision number.
pub const MAX_REVISION_NUMBER: i64 = 999_999;

/// Earliest timestamp a document revision may carry.
pub const MIN_ALLOWED_DATE: OffsetDateTime = datetime!(1980-01-01 0:00 UTC);

/// How far in the future a timestamp may lie to absorb clock skew.
pub const FUTURE_TOLERANCE: Duration = Duration::minutes(1);

/// Default ceiling between creation and modification (50 years, leap days included).
pub const DEFAULT_MAX_SPAN: Duration = Duration::days(50 * 365 + 13);

/// Number of leading bytes rendered as hex when content is not recognized.
pub const DIAGNOSTIC_PREVIEW_BYTES: usize = 16;

/// Largest decompressed package manifest (`[Content_Types].xml`, ODF `mimetype`) the classifier reads.
pub const MAX_MANIFEST_BYTES: u64 = 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_file_size_is_one_hundred_mebibytes() {
        assert_eq!(MAX_FILE_SIZE, 104_857_600);
    }

    #[test]
    fn default_span_covers_fifty_calendar_years() {
        let start = datetime!(1980-01-01 0:00 UTC);
        let fifty_years_later = datetime!(2030-01-01 0:00 UTC);
        assert_eq!(fifty_years_later - start, DEFAULT_MAX_SPAN);
    }
}
