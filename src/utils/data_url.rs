//! Data URL transcoding
//!
//! Images travel through the crate as `data:<mime>;base64,<payload>` strings;
//! some uploads need raw bytes instead. Both directions are pure.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::StudioError;

/// Raw payload decoded from a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Decode a base64 data URL into its MIME type and bytes.
pub fn to_binary(data_url: &str) -> Result<Binary, StudioError> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| malformed("missing ',' separator"))?;

    let mime_type = header
        .strip_prefix("data:")
        .and_then(|rest| rest.strip_suffix(";base64"))
        .filter(|mime| mime.contains('/'))
        .ok_or_else(|| malformed("expected a 'data:<mime>;base64,' header"))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| malformed(&format!("invalid base64 payload: {e}")))?;

    Ok(Binary {
        mime_type: mime_type.to_string(),
        bytes,
    })
}

/// Encode bytes as a base64 data URL.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    data_url_from_base64(mime_type, &STANDARD.encode(bytes))
}

/// Wrap an already base64-encoded payload.
pub fn data_url_from_base64(mime_type: &str, base64_payload: &str) -> String {
    format!("data:{mime_type};base64,{base64_payload}")
}

fn malformed(reason: &str) -> StudioError {
    StudioError::MalformedDataUrl(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_header_and_bytes() {
        let binary = to_binary("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(binary.mime_type, "image/png");
        assert_eq!(
            binary.bytes,
            vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]
        );
    }

    #[test]
    fn round_trip_is_identity_for_well_formed_urls() {
        for url in [
            "data:image/png;base64,iVBORw0KGgo=",
            "data:image/jpeg;base64,/9j/4AAQSkZJRg==",
            "data:video/mp4;base64,AAAAGGZ0eXBtcDQy",
            "data:image/webp;base64,",
        ] {
            let binary = to_binary(url).unwrap();
            assert_eq!(to_data_url(&binary.mime_type, &binary.bytes), url);
        }
    }

    #[test]
    fn rejects_inputs_without_a_recognizable_header() {
        for bad in [
            "iVBORw0KGgo=",
            "data:image/png,iVBORw0KGgo=",
            "data:;base64,iVBORw0KGgo=",
            "image/png;base64,iVBORw0KGgo=",
            "data:image/png;base64,not base64!",
        ] {
            let err = to_binary(bad).unwrap_err();
            assert!(matches!(err, StudioError::MalformedDataUrl(_)), "{bad}");
        }
    }
}
