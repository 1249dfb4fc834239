//! Cryptographic Utilities
//!
//! Seed digests and HMAC signing of opaque values such as session identifiers.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex MD5 digest.
///
/// Only for non-secret seeds that must match existing external values.
pub fn md5_hex(data: &[u8]) -> String {
    Md5::digest(data).iter().map(|b| format!("{b:02x}")).collect()
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Sign an opaque value, producing `"{value}.{b64url(hmac)}"`
pub fn sign_value(key: &[u8], value: &str) -> String {
    let signature = hmac_sha256(key, value.as_bytes());
    format!("{}.{}", value, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a token produced by [`sign_value`] and return the signed value.
///
/// Any structural problem or signature mismatch yields `None`. The MAC
/// comparison is constant-time.
pub fn verify_signed_value<'a>(key: &[u8], token: &'a str) -> Option<&'a str> {
    let (value, signature_b64) = token.rsplit_once('.')?;
    if value.is_empty() {
        return None;
    }

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).ok()?;
    mac.update(value.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(value)
}
