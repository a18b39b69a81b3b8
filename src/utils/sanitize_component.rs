// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Produce storage-safe file names from user-provided ones.

use crate::models::AllowList;
use crate::utils::normalize::split_file_name;

/// Fallback used when nothing printable survives sanitization.
pub const FALLBACK_NAME: &str = "document";

/// Produce a storage-safe file name.
///
/// # Steps
/// - Transliterate Unicode to ASCII with `deunicode` (e.g., "Å" → "A").
/// - Allow ASCII alphanumerics plus `-`, `_`, and `.`; treat other characters as `_`.
/// - Collapse runs of `_` and `.`; trim trailing dots/spaces.
/// - Guard against names the allow-list reserves and against empty names.
///
/// Multi-part extensions survive intact (`brief.v1.2.tar.gz` stays
/// `brief.v1.2.tar.gz`).
pub fn sanitize_component(value: &str, allow_list: &AllowList) -> String {
    let transliterated = deunicode::deunicode(value);
    let mut out = String::with_capacity(transliterated.len());
    let mut last: Option<char> = None;

    for ch in transliterated.chars() {
        let mapped = if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.' {
            ch
        } else {
            '_'
        };

        // Collapse runs of separators.
        if (mapped == '_' || mapped == '.') && last == Some(mapped) {
            continue;
        }
        out.push(mapped);
        last = Some(mapped);
    }

    while let Some(pos) = out.find("_.") {
        out.remove(pos);
    }

    let trimmed = out.trim_matches(|c| c == '_' || c == '.' || c == ' ');
    if trimmed.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    let out = trimmed.to_string();

    let (base, ext) = split_file_name(&out);
    if allow_list.is_reserved_name(base) {
        return format!("{base}_{}", ext.unwrap_or(""));
    }

    out
}
