// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Allow-lists for extensions and MIME types plus the reserved-name deny list.
//!
//! An [`AllowList`] is built once at startup and shared read-only afterwards;
//! every lookup is case-insensitive.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::ContractError;
use crate::utils::normalize::{normalize_extension, normalize_mime_type};

const STANDARD_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".odt", ".ods", ".odp", ".rtf",
    ".txt", ".jpg", ".jpeg", ".png", ".gif", ".tif", ".tiff", ".bmp", ".zip",
];

const STANDARD_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.oasis.opendocument.text",
    "application/vnd.oasis.opendocument.spreadsheet",
    "application/vnd.oasis.opendocument.presentation",
    "application/rtf",
    "text/rtf",
    "text/plain",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/tiff",
    "image/bmp",
    "application/zip",
];

// Windows device names plus NTFS metadata files.
const STANDARD_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9", "CLOCK$",
    "CONIN$", "CONOUT$", "$MFT", "$MFTMIRR", "$LOGFILE", "$VOLUME", "$ATTRDEF", "$BITMAP",
    "$BOOT", "$BADCLUS", "$SECURE", "$UPCASE", "$EXTEND",
];

static STANDARD: Lazy<Arc<AllowList>> = Lazy::new(|| Arc::new(AllowList::standard()));

/// Closed sets of permitted extensions and MIME types and forbidden base names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowList {
    extensions: HashSet<String>,
    mime_types: HashSet<String>,
    reserved_names: HashSet<String>,
}

/// On-disk shape of a custom allow-list.
#[derive(Debug, Deserialize)]
struct AllowListFile {
    extensions: Vec<String>,
    mime_types: Vec<String>,
    #[serde(default)]
    reserved_names: Option<Vec<String>>,
}

impl AllowList {
    /// Build an allow-list from caller-provided entries.
    ///
    /// Extensions may be given with or without the leading dot. An entry that
    /// is empty after normalization is a configuration bug and is rejected.
    pub fn new<E, M, R>(extensions: E, mime_types: M, reserved_names: R) -> Result<Self, ContractError>
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        M: IntoIterator,
        M::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Ok(Self {
            extensions: collect_normalized(extensions, "extensions", normalize_extension)?,
            mime_types: collect_normalized(mime_types, "mime_types", normalize_mime_type)?,
            reserved_names: collect_normalized(reserved_names, "reserved_names", |name| {
                name.trim().to_lowercase()
            })?,
        })
    }

    /// Built-in list covering common office documents, images and ZIP archives.
    pub fn standard() -> Self {
        Self {
            extensions: STANDARD_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            mime_types: STANDARD_MIME_TYPES.iter().map(|m| m.to_string()).collect(),
            reserved_names: STANDARD_RESERVED_NAMES
                .iter()
                .map(|n| n.to_lowercase())
                .collect(),
        }
    }

    /// Process-wide instance of [`AllowList::standard`], built on first use.
    pub fn shared_standard() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    /// Parse a JSON allow-list of the form
    /// `{"extensions": [...], "mime_types": [...], "reserved_names": [...]}`.
    ///
    /// `reserved_names` falls back to the built-in set when omitted.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or contains empty entries.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: AllowListFile =
            serde_json::from_str(json).context("Failed to parse allow-list JSON")?;
        let reserved = file.reserved_names.unwrap_or_else(|| {
            STANDARD_RESERVED_NAMES
                .iter()
                .map(|n| n.to_string())
                .collect()
        });
        Self::new(file.extensions, file.mime_types, reserved)
            .context("Allow-list JSON contains invalid entries")
    }

    /// Membership test for an extension in any case, with or without dot.
    pub fn allows_extension(&self, extension: &str) -> bool {
        self.extensions.contains(&normalize_extension(extension))
    }

    /// Membership test for a MIME type in any case; parameters are ignored.
    pub fn allows_mime_type(&self, mime_type: &str) -> bool {
        self.mime_types.contains(&normalize_mime_type(mime_type))
    }

    /// True when `base_name` (no extension) is a reserved name, ignoring case.
    pub fn is_reserved_name(&self, base_name: &str) -> bool {
        self.reserved_names.contains(&base_name.trim().to_lowercase())
    }

    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    pub fn mime_type_count(&self) -> usize {
        self.mime_types.len()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::standard()
    }
}

fn collect_normalized<I>(
    entries: I,
    list: &'static str,
    normalize: impl Fn(&str) -> String,
) -> Result<HashSet<String>, ContractError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| {
            let normalized = normalize(entry.as_ref());
            if normalized.is_empty() {
                Err(ContractError::EmptyAllowListEntry { list })
            } else {
                Ok(normalized)
            }
        })
        .collect()
}
