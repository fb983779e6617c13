//! HNAP keyed digests.
//!
//! Both the login key derivation and the per-request `HNAP_AUTH` header use
//! HMAC-MD5 rendered as uppercase hex.

use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use md5::Md5;

type HmacMd5 = Hmac<Md5>;

/// Computes `HMAC-MD5(key, message)` as uppercase hex.
pub fn digest(message: &str, key: &[u8]) -> String {
    let mut mac = <HmacMd5 as Mac>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    hex::encode_upper(mac.finalize().into_bytes())
}

/// Signature for a single authenticated HNAP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSignature {
    pub digest: String,
    pub timestamp: i64,
}

impl fmt::Display for RequestSignature {
    /// Renders the `HNAP_AUTH` header value.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.digest, self.timestamp)
    }
}

/// Signs a call to `action_uri` at `now`.
///
/// The signed message is the Unix timestamp immediately followed by the quoted
/// action URI, e.g. `1700000000"http://purenetworks.com/HNAP1/Login"`.
pub fn sign_request(action_uri: &str, key: &[u8], now: DateTime<Utc>) -> RequestSignature {
    let timestamp = now.timestamp();
    RequestSignature {
        digest: digest(&format!("{timestamp}\"{action_uri}\""), key),
        timestamp,
    }
}
