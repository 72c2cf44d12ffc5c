//! Photo list consolidation and base64 data-URL validation
//!
//! Requests historically carried the same photo list in two fields.
//! `consolidate` merges the two into one canonical deduplicated list;
//! `is_valid_image` checks that an entry is a well-formed `data:image/...`
//! URL whose payload decodes to bytes carrying a known image signature.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Merge two photo lists into one canonical ordered list: every entry of
/// `primary` in order, then any entry of `legacy` not already present.
/// Idempotent and side-effect free.
pub fn consolidate(primary: &[String], legacy: &[String]) -> Vec<String> {
    let mut all: Vec<String> = Vec::with_capacity(primary.len() + legacy.len());
    for photo in primary.iter().chain(legacy.iter()) {
        if !all.contains(photo) {
            all.push(photo.clone());
        }
    }
    all
}

/// True iff `data_url` is a well-formed base64 image data URL: `data:image/`
/// prefix, a comma separating header from a non-empty payload, valid base64,
/// and decoded bytes matching a recognized image signature. Malformed input
/// degrades to `false`.
pub fn is_valid_image(data_url: &str) -> bool {
    let trimmed = data_url.trim();
    if trimmed.is_empty() || !trimmed.starts_with("data:image/") {
        return false;
    }

    let Some(comma) = trimmed.find(',') else {
        return false;
    };
    let payload = &trimmed[comma + 1..];
    if payload.is_empty() {
        return false;
    }

    match BASE64.decode(payload) {
        Ok(bytes) => has_image_signature(&bytes),
        Err(_) => false,
    }
}

/// Check the leading bytes for one of the recognized image file signatures.
pub fn has_image_signature(bytes: &[u8]) -> bool {
    if bytes.len() < 4 {
        return false;
    }

    // JPEG: FF D8 FF
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return true;
    }

    // PNG: 89 50 4E 47
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return true;
    }

    // GIF: 47 49 46 38 ("GIF8")
    if bytes.starts_with(&[0x47, 0x49, 0x46, 0x38]) {
        return true;
    }

    // WebP: RIFF container with WEBP fourcc at offset 8
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return true;
    }

    false
}

/// Encode raw image bytes as a data URL for document storage.
pub fn to_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    const GIF_BYTES: &[u8] = b"GIF89a\x01\x00";

    fn webp_bytes() -> Vec<u8> {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(b"WEBP");
        bytes.extend_from_slice(b"VP8 ");
        bytes
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn consolidate_preserves_primary_order_then_appends_unique_legacy() {
        let primary = strings(&["a", "b"]);
        let legacy = strings(&["b", "c", "d"]);
        assert_eq!(consolidate(&primary, &legacy), strings(&["a", "b", "c", "d"]));
    }

    #[test]
    fn consolidate_is_idempotent() {
        let primary = strings(&["a", "b"]);
        let legacy = strings(&["c", "a"]);
        let once = consolidate(&primary, &legacy);
        let twice = consolidate(&once, &[]);
        assert_eq!(once, twice);
    }

    #[test]
    fn consolidate_dedups_within_a_single_list() {
        let primary = strings(&["a", "a", "b"]);
        assert_eq!(consolidate(&primary, &[]), strings(&["a", "b"]));
    }

    #[test]
    fn consolidate_handles_empty_inputs() {
        assert!(consolidate(&[], &[]).is_empty());
        let legacy = strings(&["x"]);
        assert_eq!(consolidate(&[], &legacy), legacy);
    }

    #[test]
    fn accepts_each_recognized_signature() {
        for (content_type, bytes) in [
            ("image/jpeg", JPEG_BYTES.to_vec()),
            ("image/png", PNG_BYTES.to_vec()),
            ("image/gif", GIF_BYTES.to_vec()),
            ("image/webp", webp_bytes()),
        ] {
            let url = to_data_url(content_type, &bytes);
            assert!(is_valid_image(&url), "{content_type} should validate");
        }
    }

    #[test]
    fn rejects_missing_data_image_prefix() {
        let url = format!("data:text/plain;base64,{}", BASE64.encode(JPEG_BYTES));
        assert!(!is_valid_image(&url));
        assert!(!is_valid_image("http://example.com/photo.jpg"));
    }

    #[test]
    fn rejects_non_base64_payload() {
        assert!(!is_valid_image("data:image/jpeg;base64,!!not-base64!!"));
    }

    #[test]
    fn rejects_valid_base64_of_non_image_bytes() {
        let url = format!("data:image/jpeg;base64,{}", BASE64.encode(b"hello world"));
        assert!(!is_valid_image(&url));
    }

    #[test]
    fn rejects_missing_comma_and_empty_payload() {
        assert!(!is_valid_image("data:image/jpeg;base64"));
        assert!(!is_valid_image("data:image/jpeg;base64,"));
        assert!(!is_valid_image(""));
    }

    #[test]
    fn rejects_riff_without_webp_fourcc() {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(b"WAVE");
        let url = to_data_url("image/webp", &bytes);
        assert!(!is_valid_image(&url));
    }

    #[test]
    fn signature_check_requires_minimum_length() {
        assert!(!has_image_signature(&[0xFF, 0xD8]));
        assert!(!has_image_signature(&[]));
    }
}
