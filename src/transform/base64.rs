//! URL-safe base64 encoding of the raw body.

use ::base64::engine::general_purpose::URL_SAFE;
use ::base64::Engine as _;

/// Encode with the `-`/`_` alphabet, padded.
pub fn encode_url_safe(body: &[u8]) -> String {
    URL_SAFE.encode(body)
}
