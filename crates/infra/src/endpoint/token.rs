//! Shared access signature generation
//!
//! Token format: `uid={identifier}&ex={expiry}&sn={signature}` where
//! `signature = base64(HMAC-SHA512(key, identifier + "\n" + expiry))` and
//! `expiry` is the round-trip rendering of the expiry instant. The same
//! rendering must appear in the signed payload and in `ex`.

use apim_common::format_round_trip;
use base64::{engine::general_purpose, Engine};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Base64 HMAC-SHA512 of `payload` under `key`.
pub fn compute_signature_base64(key: &str, payload: &str) -> String {
    let mut mac =
        HmacSha512::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// Build a signed token for `identifier` valid until `expiry`.
pub fn shared_access_token(identifier: &str, key: &str, expiry: DateTime<Utc>) -> String {
    let expiry = format_round_trip(expiry);
    let signature = compute_signature_base64(key, &format!("{identifier}\n{expiry}"));
    format!("uid={identifier}&ex={expiry}&sn={signature}")
}
