// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! File signature catalog used as ground truth for content detection.

use serde::Serialize;

/// Container family whose concrete format needs a second look after the prefix matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Container {
    /// Plain format, the prefix is conclusive.
    None,
    /// ZIP archive that may hold an Office Open XML or OpenDocument package.
    Zip,
    /// OLE2 compound file that may hold a legacy Word, Excel or PowerPoint document.
    Ole,
}

/// Immutable magic-number entry: leading bytes plus the canonical MIME type and extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileSignature {
    pub magic: &'static [u8],
    pub mime_type: &'static str,
    pub extension: &'static str,
    pub container: Container,
}

impl FileSignature {
    const fn plain(magic: &'static [u8], mime_type: &'static str, extension: &'static str) -> Self {
        Self {
            magic,
            mime_type,
            extension,
            container: Container::None,
        }
    }

    const fn container(
        magic: &'static [u8],
        mime_type: &'static str,
        extension: &'static str,
        container: Container,
    ) -> Self {
        Self {
            magic,
            mime_type,
            extension,
            container,
        }
    }

    /// True when `bytes` is at least as long as the magic and starts with it.
    pub fn matches(&self, bytes: &[u8]) -> bool {
        bytes.starts_with(self.magic)
    }
}

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

pub const PDF: FileSignature = FileSignature::plain(b"%PDF", "application/pdf", ".pdf");
pub const PNG: FileSignature = FileSignature::plain(
    &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
    "image/png",
    ".png",
);
pub const JPEG: FileSignature = FileSignature::plain(&[0xFF, 0xD8, 0xFF], "image/jpeg", ".jpg");
pub const GIF87: FileSignature = FileSignature::plain(b"GIF87a", "image/gif", ".gif");
pub const GIF89: FileSignature = FileSignature::plain(b"GIF89a", "image/gif", ".gif");
pub const TIFF_LE: FileSignature =
    FileSignature::plain(&[0x49, 0x49, 0x2A, 0x00], "image/tiff", ".tiff");
pub const TIFF_BE: FileSignature =
    FileSignature::plain(&[0x4D, 0x4D, 0x00, 0x2A], "image/tiff", ".tiff");
pub const BMP: FileSignature = FileSignature::plain(b"BM", "image/bmp", ".bmp");
pub const RTF: FileSignature = FileSignature::plain(b"{\\rtf", "application/rtf", ".rtf");
pub const SEVEN_ZIP: FileSignature = FileSignature::plain(
    &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C],
    "application/x-7z-compressed",
    ".7z",
);
pub const RAR: FileSignature = FileSignature::plain(
    &[0x52, 0x61, 0x72, 0x21, 0x1A, 0x07],
    "application/vnd.rar",
    ".rar",
);
pub const GZIP: FileSignature = FileSignature::plain(&[0x1F, 0x8B], "application/gzip", ".gz");
pub const UTF8_TEXT: FileSignature = FileSignature::plain(&[0xEF, 0xBB, 0xBF], "text/plain", ".txt");

pub const ZIP: FileSignature =
    FileSignature::container(ZIP_MAGIC, "application/zip", ".zip", Container::Zip);
pub const DOCX: FileSignature = FileSignature::container(
    ZIP_MAGIC,
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ".docx",
    Container::Zip,
);
pub const XLSX: FileSignature = FileSignature::container(
    ZIP_MAGIC,
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ".xlsx",
    Container::Zip,
);
pub const PPTX: FileSignature = FileSignature::container(
    ZIP_MAGIC,
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ".pptx",
    Container::Zip,
);
pub const ODT: FileSignature = FileSignature::container(
    ZIP_MAGIC,
    "application/vnd.oasis.opendocument.text",
    ".odt",
    Container::Zip,
);
pub const ODS: FileSignature = FileSignature::container(
    ZIP_MAGIC,
    "application/vnd.oasis.opendocument.spreadsheet",
    ".ods",
    Container::Zip,
);
pub const ODP: FileSignature = FileSignature::container(
    ZIP_MAGIC,
    "application/vnd.oasis.opendocument.presentation",
    ".odp",
    Container::Zip,
);

pub const DOC: FileSignature =
    FileSignature::container(OLE_MAGIC, "application/msword", ".doc", Container::Ole);
pub const XLS: FileSignature =
    FileSignature::container(OLE_MAGIC, "application/vnd.ms-excel", ".xls", Container::Ole);
pub const PPT: FileSignature = FileSignature::container(
    OLE_MAGIC,
    "application/vnd.ms-powerpoint",
    ".ppt",
    Container::Ole,
);

/// Prefix catalog scanned in order; the first match wins.
///
/// No entry may be shadowed by an earlier entry whose magic is a prefix of its own.
pub const SIGNATURE_CATALOG: &[FileSignature] = &[
    PDF, PNG, JPEG, GIF87, GIF89, TIFF_LE, TIFF_BE, BMP, DOC, RTF, ZIP, SEVEN_ZIP, RAR, GZIP,
    UTF8_TEXT,
];

/// How much the detected type can be trusted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Prefix match, confirmed by the container manifest where one applies.
    High,
    /// Inferred from raw byte scanning because the container could not be parsed.
    Low,
}

/// Concrete type the classifier settled on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub mime_type: &'static str,
    pub extension: &'static str,
    pub confidence: Confidence,
}

impl Detection {
    pub fn new(signature: &FileSignature, confidence: Confidence) -> Self {
        Self {
            mime_type: signature.mime_type,
            extension: signature.extension,
            confidence,
        }
    }
}

/// Classifier verdict for one buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    Recognized(Detection),
    /// No catalog entry matched; `preview_hex` holds the leading bytes for diagnostics.
    Unrecognized { preview_hex: String },
}

impl Classification {
    pub fn detection(&self) -> Option<Detection> {
        match self {
            Self::Recognized(detection) => Some(*detection),
            Self::Unrecognized { .. } => None,
        }
    }
}
