// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Canonical forms for user-supplied extensions, MIME types and file names.

use once_cell::sync::Lazy;
use regex::Regex;

// RFC 6838 restricted-name characters for both type and subtype.
static MIME_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9!#$&^_.+-]{0,126}/[a-z0-9][a-z0-9!#$&^_.+-]{0,126}$")
        .expect("MIME shape pattern is valid")
});

/// Lowercase an extension and make sure it carries exactly one leading dot.
///
/// Returns an empty string when nothing but dots and whitespace was given.
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return String::new();
    }
    format!(".{}", trimmed.to_lowercase())
}

/// Lowercase a MIME type and drop any parameters (`; charset=...`).
pub fn normalize_mime_type(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

/// True when a normalized MIME type has the `type/subtype` shape.
pub fn is_mime_shape(mime_type: &str) -> bool {
    MIME_SHAPE.is_match(mime_type)
}

/// Split a file name into its base name and last extension segment (with dot).
///
/// Leading-dot names such as `.env` have no extension; their base is the whole name.
pub fn split_file_name(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => (&file_name[..pos], Some(&file_name[pos..])),
        _ => (file_name, None),
    }
}
