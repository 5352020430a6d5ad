//! Webhook authenticity check: HMAC-SHA512 over the exact request bytes,
//! hex-encoded in the signature header.

use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the upstream's signature.
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// Returns `true` only if `provided` is the hex HMAC-SHA512 of `body` under
/// `secret`. A missing or empty secret or signature, or a signature that is
/// not valid hex, yields `false`. The comparison is constant-time.
pub fn verify(body: &[u8], provided: Option<&str>, secret: Option<&str>) -> bool {
    let (Some(provided), Some(secret)) = (provided, secret) else {
        return false;
    };
    if secret.is_empty() || provided.is_empty() {
        return false;
    }
    let Ok(expected) = hex::decode(provided.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha512::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Lower-case hex HMAC-SHA512 of `body` under `secret`.
pub fn sign(body: &[u8], secret: &str) -> String {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time equality for bearer tokens. Both sides are reduced to a
/// fixed-length MAC under `expected`, so timing reveals neither content nor
/// length.
pub fn tokens_match(presented: &str, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }
    let tag = sign(expected.as_bytes(), expected);
    verify(presented.as_bytes(), Some(&tag), Some(expected))
}
