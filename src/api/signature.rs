//! HMAC-SHA256 request body signing.
//!
//! The backend recomputes the digest over the exact body bytes with the
//! shared API secret and compares it with the `x-signature` header.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Result, SdkError};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the hex body signature on requests with a body.
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Lowercase hex HMAC-SHA256 of `body` keyed with `secret`.
pub fn sign_body(secret: &str, body: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| SdkError::Unknown(format!("Failed to initialise HMAC: {}", e)))?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}
