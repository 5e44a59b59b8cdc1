//! Bearer token → [`Claims`] decoding.
//!
//! Tokens are `header.payload.signature`; only the payload is read. This is
//! a pure parse: a successful decode says nothing about authenticity.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::{Claims, TokenError};

/// Number of `.`-separated segments in a token.
pub const SEGMENT_COUNT: usize = 3;

/// Standard alphabet, padding optional. URL-safe input is translated into
/// this alphabet before decoding (RFC 4648 §5).
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode a token's payload segment into [`Claims`].
///
/// - [`TokenError::InvalidTokenFormat`] unless there are exactly three segments
/// - [`TokenError::InvalidTokenEncoding`] when the payload is not base64url
/// - [`TokenError::InvalidTokenPayload`] when the bytes are not a JSON claims object
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let payload = payload_segment(token)?;
    let bytes = decode_segment(payload)?;
    parse_payload(&bytes)
}

fn payload_segment(token: &str) -> Result<&str, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != SEGMENT_COUNT {
        return Err(TokenError::InvalidTokenFormat {
            segments: segments.len(),
        });
    }
    Ok(segments[1])
}

/// Decode one base64url segment (`-`/`_` alphabet, padding optional).
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    let standard: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    PAYLOAD_ENGINE
        .decode(standard.as_bytes())
        .map_err(|e| TokenError::InvalidTokenEncoding(e.to_string()))
}

fn parse_payload(bytes: &[u8]) -> Result<Claims, TokenError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| TokenError::InvalidTokenPayload(e.to_string()))?;

    // serde would happily fill a struct from a JSON array; the payload must be a record.
    if !value.is_object() {
        return Err(TokenError::InvalidTokenPayload(
            "payload is not a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| TokenError::InvalidTokenPayload(e.to_string()))
}
