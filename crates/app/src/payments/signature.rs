//! Webhook signature verification.
//!
//! Deliveries carry a header of the form `t=<unix seconds>,v1=<hex>[,v1=<hex>]`.
//! Each `v1` value is an HMAC-SHA256 over `"{t}.{raw body}"` keyed with the
//! endpoint secret. Any matching `v1` accepts the delivery, which lets the
//! provider roll secrets without downtime.

use std::fmt;

use hmac::{Hmac, Mac};
use jiff::Timestamp;
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Name of the HTTP header carrying the signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

pub const DEFAULT_TOLERANCE_SECONDS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature header missing")]
    Missing,

    #[error("signature header malformed")]
    Malformed,

    #[error("signature timestamp outside tolerance")]
    Expired,

    #[error("no signature matches the payload")]
    Mismatch,

    #[error("webhook secret is empty")]
    EmptySecret,
}

#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Zeroizing<Vec<u8>>,
    tolerance_seconds: u64,
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("tolerance_seconds", &self.tolerance_seconds)
            .finish_non_exhaustive()
    }
}

impl SignatureVerifier {
    /// Build a verifier keyed with the endpoint secret.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::EmptySecret`] for a zero-length secret, which
    /// would let anyone produce a valid signature.
    pub fn new(secret: impl AsRef<[u8]>, tolerance_seconds: u64) -> Result<Self, SignatureError> {
        let secret = secret.as_ref();

        if secret.is_empty() {
            return Err(SignatureError::EmptySecret);
        }

        Ok(Self {
            secret: Zeroizing::new(secret.to_vec()),
            tolerance_seconds,
        })
    }

    /// Check `header` against `payload` at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] describing why the delivery is rejected.
    pub fn verify(&self, payload: &[u8], header: Option<&str>) -> Result<(), SignatureError> {
        self.verify_at(payload, header, Timestamp::now())
    }

    /// Check `header` against `payload` as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] describing why the delivery is rejected.
    pub fn verify_at(
        &self,
        payload: &[u8],
        header: Option<&str>,
        now: Timestamp,
    ) -> Result<(), SignatureError> {
        let header = header
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(SignatureError::Missing)?;

        let parsed = ParsedHeader::parse(header)?;

        if now.as_second().abs_diff(parsed.timestamp) > self.tolerance_seconds {
            return Err(SignatureError::Expired);
        }

        for candidate in &parsed.signatures {
            let mac = self.keyed_mac(parsed.timestamp, payload)?;

            // Constant-time comparison.
            if mac.verify_slice(candidate).is_ok() {
                return Ok(());
            }
        }

        Err(SignatureError::Mismatch)
    }

    /// Produce a header value for `payload` signed at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Malformed`] if the secret cannot key the MAC.
    pub fn sign(&self, payload: &[u8], timestamp: i64) -> Result<String, SignatureError> {
        let mac = self.keyed_mac(timestamp, payload)?;
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("t={timestamp},v1={signature}"))
    }

    fn keyed_mac(&self, timestamp: i64, payload: &[u8]) -> Result<HmacSha256, SignatureError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| SignatureError::Malformed)?;

        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);

        Ok(mac)
    }
}

#[derive(Debug)]
struct ParsedHeader {
    timestamp: i64,
    signatures: Vec<Vec<u8>>,
}

impl ParsedHeader {
    fn parse(header: &str) -> Result<Self, SignatureError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or(SignatureError::Malformed)?;

            match key {
                "t" => {
                    timestamp = Some(value.parse::<i64>().map_err(|_| SignatureError::Malformed)?);
                }
                "v1" => {
                    signatures.push(hex::decode(value).map_err(|_| SignatureError::Malformed)?);
                }
                // Other schemes (e.g. v0) are ignored.
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureError::Malformed)?;

        if signatures.is_empty() {
            return Err(SignatureError::Malformed);
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}
