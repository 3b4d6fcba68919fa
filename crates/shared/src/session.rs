//! Signed, time-limited admin session tokens.
//!
//! A token is `<expiry-millis>.<signature>` where the signature is the hex
//! HMAC-SHA256 of the payload under a server-held secret. With no secret
//! configured, tokens are neither issued nor accepted.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Separator between the expiry payload and its signature.
const TOKEN_SEPARATOR: char = '.';

fn sign(secret: &str, payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Creates a session token expiring `ttl` after `now`.
///
/// Returns `None` when the secret is empty: an unconfigured secret disables
/// session issuance entirely.
pub fn create_token(secret: &str, now: DateTime<Utc>, ttl: Duration) -> Option<String> {
    if secret.is_empty() {
        return None;
    }

    let expires_at = now + ttl;
    let payload = expires_at.timestamp_millis().to_string();
    let signature = sign(secret, &payload);
    Some(format!("{}{}{}", payload, TOKEN_SEPARATOR, signature))
}

/// Verifies a session token against the secret at time `now`.
///
/// Rejects expired payloads, malformed tokens, and signature mismatches.
/// Always rejects when the secret is empty.
pub fn verify_token(secret: &str, token: &str, now: DateTime<Utc>) -> bool {
    if secret.is_empty() {
        return false;
    }

    let Some((payload, signature)) = token.split_once(TOKEN_SEPARATOR) else {
        return false;
    };

    let Ok(expires_at_millis) = payload.parse::<i64>() else {
        return false;
    };
    if expires_at_millis <= now.timestamp_millis() {
        return false;
    }

    let Ok(signature_bytes) = hex::decode(signature) else {
        return false;
    };

    // verify_slice is constant-time
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature_bytes).is_ok()
}
