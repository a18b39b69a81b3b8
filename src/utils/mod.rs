// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by the validators and the command line.

pub mod hash;
pub mod mime;
pub mod normalize;
pub mod sanitize_component;

/// Compute SHA-256 digests of buffers and files.
pub use hash::{hash_bytes, hash_file, is_sha256_hex};
/// Guess a MIME type from a path.
pub use mime::guess_mime;
/// Sanitize user-provided names into storage-safe file names.
pub use sanitize_component::sanitize_component;
