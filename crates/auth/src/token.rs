//! Wire credential decoding.
//!
//! A credential is `header.payload.signature`, each segment base64url. Only
//! the payload is read here; trust in the signature is established upstream.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

/// Untyped claim tree as decoded from the payload segment.
pub type ClaimTree = serde_json::Value;

pub const BEARER_PREFIX: &str = "Bearer ";

const SEGMENT_COUNT: usize = 3;
const PAYLOAD_INDEX: usize = 1;

/// base64url that accepts both padded and unpadded segments.
const URL_SAFE_ANY_PADDING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Wrong segment count or undecodable payload segment.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The payload decoded but is not a JSON document.
    #[error("claim payload is not valid JSON: {0}")]
    ClaimParseFailure(String),
}

/// Strip the `Bearer ` scheme from an `Authorization` header value.
///
/// Returns `None` for other schemes and for an empty credential.
pub fn extract_bearer(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() { None } else { Some(token) }
}

/// Decode the payload segment to UTF-8 text without parsing it.
pub fn decode_payload(token: &str) -> Result<String, TokenError> {
    let mut segments: Vec<&str> = token.split('.').collect();
    // Trailing empty segments are not counted: "h.p.s." has three, "h.p." two.
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    if segments.len() != SEGMENT_COUNT {
        return Err(TokenError::MalformedToken(format!(
            "expected {SEGMENT_COUNT} segments, found {}",
            segments.len()
        )));
    }

    let bytes = URL_SAFE_ANY_PADDING
        .decode(segments[PAYLOAD_INDEX])
        .map_err(|e| TokenError::MalformedToken(format!("payload segment: {e}")))?;

    String::from_utf8(bytes)
        .map_err(|e| TokenError::MalformedToken(format!("payload is not UTF-8: {e}")))
}

/// Decode and parse the payload; invalid JSON is a hard error.
pub fn decode_strict(token: &str) -> Result<ClaimTree, TokenError> {
    let text = decode_payload(token)?;
    serde_json::from_str(&text).map_err(|e| TokenError::ClaimParseFailure(e.to_string()))
}

/// Decode and parse the payload; invalid JSON means "no usable credential".
///
/// Malformed tokens still fail: only the parse step is softened.
pub fn decode_lenient(token: &str) -> Result<Option<ClaimTree>, TokenError> {
    match decode_strict(token) {
        Ok(tree) => Ok(Some(tree)),
        Err(TokenError::ClaimParseFailure(message)) => {
            tracing::warn!(%message, "credential payload is not JSON; treating as absent");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
