//! MIME Type Detection Utilities
//!
//! Binary upstream responses do not always carry a usable `Content-Type`.
//! These helpers fall back to magic-number sniffing via the `infer` crate.

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Resolve the MIME type of a downloaded payload.
///
/// Prefers a concrete `Content-Type` header (parameters stripped), then magic
/// numbers, then `fallback`. Generic types such as `application/octet-stream`
/// are treated as absent.
pub fn resolve_media_mime(content_type: Option<&str>, bytes: &[u8], fallback: &str) -> String {
    if let Some(ct) = content_type
        && let Some(essence) = ct.split(';').next().map(str::trim)
        && is_media_type(essence)
    {
        return essence.to_ascii_lowercase();
    }
    if let Some(m) = guess_mime_from_bytes(bytes) {
        return m;
    }
    fallback.to_string()
}

fn is_media_type(essence: &str) -> bool {
    let lower = essence.to_ascii_lowercase();
    lower.starts_with("image/") || lower.starts_with("video/") || lower.starts_with("audio/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn header_wins_when_specific() {
        assert_eq!(
            resolve_media_mime(Some("image/jpeg; charset=binary"), PNG, "image/png"),
            "image/jpeg"
        );
    }

    #[test]
    fn generic_header_falls_back_to_sniffing() {
        assert_eq!(
            resolve_media_mime(Some("application/octet-stream"), PNG, "image/jpeg"),
            "image/png"
        );
        assert_eq!(resolve_media_mime(None, PNG, "image/jpeg"), "image/png");
    }

    #[test]
    fn unknown_bytes_use_fallback() {
        assert_eq!(
            resolve_media_mime(None, b"not media", "video/mp4"),
            "video/mp4"
        );
    }
}
