// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! MIME knowledge derived from the `mime_guess` extension table.

use std::path::Path;

/// Guess a MIME type from a path's extension, defaulting to `application/octet-stream`.
pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// True when `extension` (with or without dot) is registered for `mime_type`.
///
/// Used to treat aliases such as `.jpeg`/`.jpg` or `.tif`/`.tiff` as the same type.
pub fn extension_maps_to(extension: &str, mime_type: &str) -> bool {
    let bare = extension.trim_start_matches('.');
    !bare.is_empty()
        && mime_guess::from_ext(bare)
            .iter()
            .any(|guess| guess.essence_str().eq_ignore_ascii_case(mime_type))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn guess_mime_uses_extension() {
        assert_eq!(guess_mime(Path::new("brief.PDF")), "application/pdf");
        assert_eq!(
            guess_mime(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    // Extension aliases resolve to the same registered MIME type.
    #[test]
    fn extension_aliases_map_to_shared_mime() {
        assert!(extension_maps_to(".jpeg", "image/jpeg"));
        assert!(extension_maps_to("jpg", "image/jpeg"));
        assert!(extension_maps_to(".tif", "image/tiff"));
        assert!(!extension_maps_to(".pdf", "image/jpeg"));
        assert!(!extension_maps_to(".", "image/jpeg"));
    }
}
