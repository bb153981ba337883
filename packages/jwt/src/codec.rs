//! Base64url transport encoding (RFC 7515 §2)
//!
//! Encoding uses the URL-safe alphabet with padding stripped. Decoding pads the
//! input back up to a multiple of four characters and then requires canonical
//! base64, so trailing garbage bits are rejected rather than ignored.

use crate::error::{JwtError, JwtResult};
use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};

/// Encode bytes as unpadded base64url text
#[inline]
#[must_use]
pub fn encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode unpadded (or padded) base64url text
///
/// # Errors
/// Returns [`JwtError::MalformedEncoding`] if the padded text is not valid base64url.
pub fn decode(input: &str) -> JwtResult<Vec<u8>> {
    let remainder = input.len() % 4;
    let padded = if remainder == 0 {
        std::borrow::Cow::Borrowed(input)
    } else {
        let mut owned = String::with_capacity(input.len() + 4 - remainder);
        owned.push_str(input);
        owned.extend(std::iter::repeat_n('=', 4 - remainder));
        std::borrow::Cow::Owned(owned)
    };

    URL_SAFE
        .decode(padded.as_bytes())
        .map_err(|e| JwtError::MalformedEncoding(e.to_string()))
}
