// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Content classification: identify a file's real type from its leading bytes.
//!
//! Responsibilities:
//! - Scan the signature catalog in order and take the first prefix match.
//! - Open ZIP containers to tell Office Open XML and OpenDocument packages
//!   apart from plain archives.
//! - Look for stream names inside OLE2 compound files to tell legacy Word,
//!   Excel and PowerPoint apart.
//! - Fall back to raw byte scanning (reported as low confidence) when a
//!   container cannot be parsed.

use std::io::{Cursor, Read};

use anyhow::{Context, Result, bail};
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::config::{DIAGNOSTIC_PREVIEW_BYTES, MAX_MANIFEST_BYTES};
use crate::models::signature::{
    Classification, Confidence, Container, DOC, DOCX, Detection, FileSignature, ODP, ODS, ODT,
    PPT, PPTX, SIGNATURE_CATALOG, XLS, XLSX, ZIP,
};

const CONTENT_TYPES_ENTRY: &str = "[Content_Types].xml";
const ODF_MIMETYPE_ENTRY: &str = "mimetype";

/// Main-part content types in `[Content_Types].xml`, checked in order.
const OOXML_MAIN_PARTS: &[(&str, FileSignature)] = &[
    ("wordprocessingml.document.main", DOCX),
    ("spreadsheetml.sheet.main", XLSX),
    ("presentationml.presentation.main", PPTX),
];

/// Part-name prefixes that betray an Office package in raw ZIP bytes.
const OOXML_PART_PREFIXES: &[(&[u8], FileSignature)] = &[
    (b"word/", DOCX),
    (b"xl/", XLSX),
    (b"ppt/", PPTX),
];

const ODF_PACKAGES: &[FileSignature] = &[ODT, ODS, ODP];

/// OLE2 directory entry names (stored as UTF-16LE) for the legacy Office formats.
const OLE_STREAMS: &[(&str, FileSignature)] = &[
    ("WordDocument", DOC),
    ("Workbook", XLS),
    ("PowerPoint Document", PPT),
];

/// Identifies file types from content, independent of names and claims.
#[derive(Clone, Copy, Debug)]
pub struct ContentClassifier {
    catalog: &'static [FileSignature],
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new(SIGNATURE_CATALOG)
    }
}

impl ContentClassifier {
    /// Classifier over a custom catalog; entries are tried in slice order.
    pub fn new(catalog: &'static [FileSignature]) -> Self {
        Self { catalog }
    }

    /// Classify a buffer. Empty and unknown buffers yield [`Classification::Unrecognized`].
    pub fn classify(&self, bytes: &[u8]) -> Classification {
        let Some(signature) = self.catalog.iter().find(|sig| sig.matches(bytes)) else {
            let preview_hex = preview_hex(bytes);
            debug!(
                len = bytes.len(),
                preview = %preview_hex,
                "content matched no known file signature"
            );
            return Classification::Unrecognized { preview_hex };
        };

        let detection = match signature.container {
            Container::None => Detection::new(signature, Confidence::High),
            Container::Zip => refine_zip(bytes),
            Container::Ole => refine_ole(bytes),
        };
        debug!(
            mime = detection.mime_type,
            extension = detection.extension,
            confidence = ?detection.confidence,
            "content classified"
        );
        Classification::Recognized(detection)
    }
}

/// Hex rendering of the leading bytes, for logs and error messages.
pub fn preview_hex(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(DIAGNOSTIC_PREVIEW_BYTES)])
}

fn refine_zip(bytes: &[u8]) -> Detection {
    match inspect_zip_package(bytes) {
        Ok(signature) => Detection::new(signature.unwrap_or(&ZIP), Confidence::High),
        Err(err) => {
            debug!(error = %format!("{err:#}"), "ZIP container unreadable; scanning raw bytes");
            Detection::new(scan_zip_bytes(bytes), Confidence::Low)
        }
    }
}

/// Open the archive and read its package manifest.
///
/// Returns `Ok(None)` for a readable archive that is not an Office or
/// OpenDocument package. A manifest that is present but unreadable or larger
/// than [`MAX_MANIFEST_BYTES`] is an error.
fn inspect_zip_package(bytes: &[u8]) -> Result<Option<&'static FileSignature>> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).context("Failed to open ZIP central directory")?;

    match archive.by_name(CONTENT_TYPES_ENTRY) {
        Ok(entry) => {
            let declared_size = entry.size();
            let manifest = read_manifest(entry, declared_size, CONTENT_TYPES_ENTRY)?;
            return Ok(OOXML_MAIN_PARTS
                .iter()
                .find(|(marker, _)| manifest.contains(marker))
                .map(|(_, signature)| signature));
        }
        Err(ZipError::FileNotFound) => {}
        Err(err) => return Err(err).context("Failed to open [Content_Types].xml"),
    }

    match archive.by_name(ODF_MIMETYPE_ENTRY) {
        Ok(entry) => {
            let declared_size = entry.size();
            let declared = read_manifest(entry, declared_size, ODF_MIMETYPE_ENTRY)?;
            let declared = declared.trim();
            Ok(ODF_PACKAGES.iter().find(|sig| sig.mime_type == declared))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(err) => Err(err).context("Failed to open OpenDocument mimetype entry"),
    }
}

/// Read at most [`MAX_MANIFEST_BYTES`] of decompressed data from one entry.
fn read_manifest(entry: impl Read, declared_size: u64, name: &str) -> Result<String> {
    if declared_size > MAX_MANIFEST_BYTES {
        bail!("{name} declares {declared_size} bytes, above the {MAX_MANIFEST_BYTES} byte limit");
    }
    let mut buffer = Vec::new();
    entry
        .take(MAX_MANIFEST_BYTES + 1)
        .read_to_end(&mut buffer)
        .with_context(|| format!("Failed to read {name}"))?;
    if buffer.len() as u64 > MAX_MANIFEST_BYTES {
        bail!("{name} exceeds the {MAX_MANIFEST_BYTES} byte limit");
    }
    String::from_utf8(buffer).with_context(|| format!("{name} is not UTF-8"))
}

/// Best guess for a ZIP whose central directory could not be read.
fn scan_zip_bytes(bytes: &[u8]) -> &'static FileSignature {
    for odf in ODF_PACKAGES {
        if contains(bytes, odf.mime_type.as_bytes()) {
            return odf;
        }
    }
    OOXML_PART_PREFIXES
        .iter()
        .find(|(prefix, _)| contains(bytes, prefix))
        .map_or(&ZIP, |(_, signature)| signature)
}

fn refine_ole(bytes: &[u8]) -> Detection {
    OLE_STREAMS
        .iter()
        .find(|(stream, _)| contains(bytes, &utf16le(stream)))
        .map_or_else(
            || Detection::new(&DOC, Confidence::Low),
            |(_, signature)| Detection::new(signature, Confidence::High),
        )
}

fn utf16le(value: &str) -> Vec<u8> {
    value.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}
