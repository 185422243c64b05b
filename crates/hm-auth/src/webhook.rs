//! HMAC-SHA256 verification for identity-event webhooks.
//!
//! Events are delivered with a hex-encoded signature over the raw body;
//! unverifiable payloads must be rejected before any parsing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded payload signature
pub const WEBHOOK_SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Compute the hex-encoded HMAC-SHA256 signature for a payload
pub fn sign_payload(secret: &[u8], payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a hex-encoded HMAC-SHA256 signature (constant-time comparison)
pub fn verify_signature(secret: &[u8], payload: &[u8], signature: &str) -> bool {
    let expected_bytes = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(m) => m,
        Err(_) => return false,
    };

    mac.update(payload);
    mac.verify_slice(&expected_bytes).is_ok()
}
