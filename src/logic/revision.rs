// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Revision sequencing and creation/modification date rules.
//!
//! A document's revision numbers always form the contiguous run `1..=k`; the
//! only legal next number is `k + 1`. Dates are compared in UTC.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Duration, OffsetDateTime, UtcOffset};
use tracing::debug;

use crate::config::{
    DEFAULT_MAX_SPAN, FUTURE_TOLERANCE, MAX_REVISION_NUMBER, MIN_ALLOWED_DATE,
    MIN_REVISION_NUMBER,
};
use crate::models::ValidationResult;

pub const FIELD_REVISION_NUMBER: &str = "revisionNumber";
pub const FIELD_REVISION_NUMBERS: &str = "revisionNumbers";
pub const FIELD_CREATION_DATE: &str = "creationDate";
pub const FIELD_MODIFICATION_DATE: &str = "modificationDate";

const SECONDS_PER_DAY: i64 = 86_400;

/// True when `candidate` is exactly the next number after `existing`.
pub fn is_valid_next_number(candidate: i64, existing: &[i64]) -> bool {
    in_range(candidate) && !existing.contains(&candidate) && candidate == next_number(existing)
}

/// The next revision number: `max + 1`, or 1 for a new document.
pub fn next_number(existing: &[i64]) -> i64 {
    existing
        .iter()
        .copied()
        .max()
        .map_or(MIN_REVISION_NUMBER, |max| max.saturating_add(1))
}

/// Why a candidate revision number was rejected, with advisory fixes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionDiagnosis {
    pub candidate: i64,
    pub expected: i64,
    pub is_valid: bool,
    pub violations: Vec<ValidationResult>,
    /// Numbers the caller could use instead. Empty when the candidate is valid.
    pub suggestions: Vec<i64>,
}

/// Check `candidate` against `existing` and explain any failure.
pub fn diagnose_revision_number(candidate: i64, existing: &[i64]) -> RevisionDiagnosis {
    let expected = next_number(existing);
    let mut violations = Vec::new();

    if candidate < MIN_REVISION_NUMBER {
        violations.push(format!(
            "Revision number must be at least {MIN_REVISION_NUMBER} (got {candidate})."
        ));
    } else if candidate > MAX_REVISION_NUMBER {
        violations.push(format!(
            "Revision number must not exceed {MAX_REVISION_NUMBER} (got {candidate})."
        ));
    } else if existing.contains(&candidate) {
        violations.push(format!("Revision number {candidate} already exists."));
    } else if candidate != expected {
        violations.push(format!(
            "Revision number {candidate} is out of sequence; expected {expected}."
        ));
    }
    if expected > MAX_REVISION_NUMBER {
        violations.push(format!(
            "Revision history is exhausted; no revision after {MAX_REVISION_NUMBER} is allowed."
        ));
    }

    let mut suggestions = Vec::new();
    if !violations.is_empty() {
        if in_range(expected) {
            suggestions.push(expected);
        }
        let clamped = candidate.clamp(MIN_REVISION_NUMBER, MAX_REVISION_NUMBER);
        if clamped != candidate && !suggestions.contains(&clamped) {
            suggestions.push(clamped);
        }
        debug!(candidate, expected, ?suggestions, "revision number rejected");
    }

    RevisionDiagnosis {
        candidate,
        expected,
        is_valid: violations.is_empty(),
        violations: violations
            .into_iter()
            .map(|message| ValidationResult::new(message, FIELD_REVISION_NUMBER))
            .collect(),
        suggestions,
    }
}

/// Field-scoped violations for a candidate revision number.
pub fn validate_revision_number(candidate: i64, existing: &[i64]) -> Vec<ValidationResult> {
    diagnose_revision_number(candidate, existing).violations
}

/// Report out-of-range values, duplicates and gaps in an existing history.
pub fn check_sequence(existing: &[i64]) -> Vec<ValidationResult> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for number in existing {
        *counts.entry(*number).or_default() += 1;
    }

    let mut results = Vec::new();
    let mut push = |message: String| {
        results.push(ValidationResult::new(message, FIELD_REVISION_NUMBERS));
    };

    for number in counts.keys().filter(|n| !in_range(**n)) {
        push(format!(
            "Revision number {number} is outside the range {MIN_REVISION_NUMBER}..={MAX_REVISION_NUMBER}."
        ));
    }
    for (number, _) in counts.iter().filter(|(_, count)| **count > 1) {
        push(format!("Revision number {number} appears more than once."));
    }

    let mut expected = MIN_REVISION_NUMBER;
    for number in counts.keys().copied().filter(|n| in_range(*n)) {
        if number > expected {
            if number - 1 == expected {
                push(format!("Revision number {expected} is missing."));
            } else {
                push(format!(
                    "Revision numbers {expected}..={} are missing.",
                    number - 1
                ));
            }
        }
        expected = number + 1;
    }

    results
}

/// A span of `days` whole days, or `None` when it cannot be represented.
pub fn span_from_days(days: i64) -> Option<Duration> {
    days.checked_mul(SECONDS_PER_DAY).map(Duration::seconds)
}

/// True when both dates are in bounds, ordered, and no further apart than `max_span`.
pub fn is_valid_temporal_pair(
    creation: OffsetDateTime,
    modification: OffsetDateTime,
    max_span: Option<Duration>,
) -> bool {
    is_valid_temporal_pair_at(creation, modification, max_span, OffsetDateTime::now_utc())
}

/// [`is_valid_temporal_pair`] with an explicit clock.
pub fn is_valid_temporal_pair_at(
    creation: OffsetDateTime,
    modification: OffsetDateTime,
    max_span: Option<Duration>,
    now: OffsetDateTime,
) -> bool {
    validate_temporal_pair_at(creation, modification, max_span, now).is_empty()
}

/// Field-scoped violations for a creation/modification pair, checked against the current time.
pub fn validate_temporal_pair(
    creation: OffsetDateTime,
    modification: OffsetDateTime,
    max_span: Option<Duration>,
) -> Vec<ValidationResult> {
    validate_temporal_pair_at(creation, modification, max_span, OffsetDateTime::now_utc())
}

/// [`validate_temporal_pair`] with an explicit clock.
///
/// `max_span` defaults to [`DEFAULT_MAX_SPAN`]. Ordering and span are only
/// checked when both dates are individually valid.
pub fn validate_temporal_pair_at(
    creation: OffsetDateTime,
    modification: OffsetDateTime,
    max_span: Option<Duration>,
    now: OffsetDateTime,
) -> Vec<ValidationResult> {
    let latest = now + FUTURE_TOLERANCE;
    let mut results = Vec::new();

    let creation = check_date(&mut results, creation, "Creation date", FIELD_CREATION_DATE, latest);
    let modification = check_date(
        &mut results,
        modification,
        "Modification date",
        FIELD_MODIFICATION_DATE,
        latest,
    );

    if let (Some(creation), Some(modification)) = (creation, modification) {
        let span = max_span.unwrap_or(DEFAULT_MAX_SPAN);
        if modification < creation {
            results.push(ValidationResult::new(
                "Modification date must not be earlier than the creation date.",
                FIELD_MODIFICATION_DATE,
            ));
        } else if modification - creation > span {
            results.push(ValidationResult::new(
                format!(
                    "Modification date must be within {} days of the creation date.",
                    span.whole_days()
                ),
                FIELD_MODIFICATION_DATE,
            ));
        }
    }

    if !results.is_empty() {
        debug!(violations = %summarize(&results), "temporal pair rejected");
    }
    results
}

fn summarize(results: &[ValidationResult]) -> String {
    results
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Normalize to UTC and check the bounds; `None` when the date is unusable.
fn check_date(
    results: &mut Vec<ValidationResult>,
    value: OffsetDateTime,
    label: &str,
    field: &str,
    latest: OffsetDateTime,
) -> Option<OffsetDateTime> {
    let Some(value) = value.checked_to_offset(UtcOffset::UTC) else {
        results.push(ValidationResult::new(
            format!("{label} cannot be represented in UTC."),
            field,
        ));
        return None;
    };
    if value < MIN_ALLOWED_DATE {
        results.push(ValidationResult::new(
            format!(
                "{label} must not be earlier than {} UTC.",
                MIN_ALLOWED_DATE.date()
            ),
            field,
        ));
        return None;
    }
    if value > latest {
        results.push(ValidationResult::new(
            format!("{label} must not be in the future."),
            field,
        ));
        return None;
    }
    Some(value)
}

fn in_range(number: i64) -> bool {
    (MIN_REVISION_NUMBER..=MAX_REVISION_NUMBER).contains(&number)
}
