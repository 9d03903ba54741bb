//! API token formatting, parsing, and verifier hashing.
//!
//! Tokens look like `bz_v1_<token uuid, simple>.<64 hex secret>`. Only a
//! SHA-256 digest of the verifier input is stored, so a database leak does not
//! expose usable tokens.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{
    Digest, Sha256,
    digest::{CtOutput, Output, OutputSizeUser},
};
use thiserror::Error;
use uuid::Uuid;
use zeroize::{Zeroize, Zeroizing};

use crate::domain::profiles::records::ProfileUuid;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "bz";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: Uuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    ApiTokenSecret::from_bytes(secret)
}

#[must_use]
pub fn format_api_token(
    token_uuid: Uuid,
    version: ApiTokenVersion,
    secret: &ApiTokenSecret,
) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.simple(),
        hex::encode(secret.as_bytes())
    )
}

/// Split a bearer token into its identifier and secret.
///
/// # Errors
///
/// Returns [`ApiTokenError`] if any segment is missing or malformed.
pub fn parse_api_token(token: &str) -> Result<ParsedApiToken, ApiTokenError> {
    let (prefix_and_id, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let token_uuid_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let version = ApiTokenVersion::from_str(version_segment)?;

    let token_uuid =
        Uuid::try_parse(token_uuid_segment).map_err(|_| ApiTokenError::InvalidFormat)?;

    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    hex::decode_to_slice(secret_hex, &mut secret)
        .map_err(|_| ApiTokenError::InvalidSecretEncoding)?;

    Ok(ParsedApiToken {
        token_uuid,
        version,
        secret: ApiTokenSecret::from_bytes(secret),
    })
}

/// Hex SHA-256 digest of the canonical verifier input for a token.
///
/// Input format: `{token_uuid_hex}:{version_i16_decimal}:{profile_uuid_hex}:{secret_hex}`
#[must_use]
pub fn hash_verifier_input(
    token_uuid: &Uuid,
    version: ApiTokenVersion,
    profile_uuid: &ProfileUuid,
    secret: &ApiTokenSecret,
) -> String {
    let input = Zeroizing::new(format!(
        "{}:{}:{}:{}",
        token_uuid.simple(),
        version.as_i16(),
        profile_uuid.into_uuid().simple(),
        hex::encode(secret.as_bytes()),
    ));

    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Compare two hex verifier hashes without leaking where they differ.
///
/// Anything that is not a hex-encoded SHA-256 digest never matches.
pub fn verifier_hash_matches(computed: &str, stored: &str) -> bool {
    let (Ok(computed), Ok(stored)) = (hex::decode(computed), hex::decode(stored)) else {
        return false;
    };

    let digest_len = <Sha256 as OutputSizeUser>::output_size();

    if computed.len() != digest_len || stored.len() != digest_len {
        return false;
    }

    CtOutput::<Sha256>::new(Output::<Sha256>::clone_from_slice(&computed))
        == CtOutput::new(Output::<Sha256>::clone_from_slice(&stored))
}
