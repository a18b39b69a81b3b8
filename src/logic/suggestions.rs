// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Alternative file names for rejected uploads.

use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::config::{MAX_FILE_NAME_LENGTH, MAX_SUGGESTIONS};
use crate::logic::integrity::{FileIntegrityValidator, PROBLEMATIC_CHARACTERS};
use crate::utils::normalize::split_file_name;
use crate::utils::sanitize_component::{FALLBACK_NAME, sanitize_component};

const TOKEN_LENGTH: usize = 8;

impl FileIntegrityValidator {
    /// Propose up to `count` valid names derived from `file_name`, dated today (UTC).
    pub fn suggest_file_names(&self, file_name: &str, count: usize) -> Vec<String> {
        self.suggest_file_names_on(file_name, count, OffsetDateTime::now_utc().date())
    }

    /// Propose up to `count` valid names derived from `file_name`.
    ///
    /// Candidates come in priority order: the name with offending characters
    /// removed (plain, then fully sanitized), disambiguating suffixes for reserved
    /// names, a `YYYYMMDD` stamp from `today`, then short opaque tokens. Every
    /// suggestion passes [`FileIntegrityValidator::file_name_errors`] and differs
    /// from the input. At most [`MAX_SUGGESTIONS`] are returned.
    pub fn suggest_file_names_on(&self, file_name: &str, count: usize, today: Date) -> Vec<String> {
        let limit = count.min(MAX_SUGGESTIONS);
        let mut suggestions = Vec::with_capacity(limit);
        if limit == 0 {
            return suggestions;
        }

        let original = file_name.trim();
        let stripped = strip_offending(original);
        let stripped = if stripped.is_empty() {
            FALLBACK_NAME.to_string()
        } else {
            stripped
        };
        let (stem, extension) = split_file_name(&stripped);
        let extension = extension.unwrap_or("");

        let mut candidates = vec![
            fit(stem, "", extension),
            {
                let sanitized = sanitize_component(original, self.allow_list());
                let (base, ext) = split_file_name(&sanitized);
                fit(base, "", ext.unwrap_or(""))
            },
        ];
        if self.allow_list().is_reserved_name(stem) {
            candidates.push(fit(stem, "_1", extension));
            candidates.push(fit(stem, "_file", extension));
        }
        if let Ok(stamp) = today.format(format_description!("[year][month][day]")) {
            candidates.push(fit(stem, &format!("_{stamp}"), extension));
        }

        for candidate in candidates {
            self.accept(&mut suggestions, candidate, file_name);
            if suggestions.len() == limit {
                return suggestions;
            }
        }

        // Tokens are random, so a few extra attempts fill any remaining slots.
        for _ in 0..limit * 2 {
            if suggestions.len() == limit {
                break;
            }
            self.accept(&mut suggestions, fit(stem, &format!("_{}", token()), extension), file_name);
        }

        debug!(
            file_name,
            requested = count,
            produced = suggestions.len(),
            "generated file name suggestions"
        );
        suggestions
    }

    fn accept(&self, suggestions: &mut Vec<String>, candidate: String, original: &str) {
        if candidate != original
            && !suggestions.contains(&candidate)
            && self.is_valid_file_name(&candidate)
        {
            suggestions.push(candidate);
        }
    }
}

/// Drop control characters, path separators and problematic characters, then
/// trailing dots and spaces.
fn strip_offending(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| {
            !c.is_control() && *c != '/' && *c != '\\' && !PROBLEMATIC_CHARACTERS.contains(c)
        })
        .collect();
    kept.trim().trim_end_matches(['.', ' ']).to_string()
}

/// Join `stem`, `suffix` and `extension`, shortening the stem to stay within the name limit.
fn fit(stem: &str, suffix: &str, extension: &str) -> String {
    let reserved = suffix.chars().count() + extension.chars().count();
    let budget = MAX_FILE_NAME_LENGTH.saturating_sub(reserved);
    let stem = match stem.char_indices().nth(budget) {
        Some((cut, _)) => &stem[..cut],
        None => stem,
    };
    let stem = stem.trim_end_matches(['.', ' ']);
    format!("{stem}{suffix}{extension}")
}

fn token() -> String {
    Uuid::new_v4().simple().to_string()[..TOKEN_LENGTH].to_string()
}
