//! Admin token minting and request headers.
//!
//! Ghost authenticates admin requests with a short-lived HS256 JWT signed
//! by the secret half of an admin API key. The key id travels in the JWT
//! header (`kid`) so the server can pick the matching secret. A new token
//! is minted for every request and nothing is cached.

use crate::config::DEFAULT_API_VERSION;
use crate::error::{GhostError, GhostResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Audience claim expected by the admin API.
pub const DEFAULT_AUDIENCE: &str = "/admin/";

/// Lifetime of a minted token.
pub const TOKEN_TTL_SECS: i64 = 5 * 60;

/// Name of the API version header, lowercased for `HeaderName::from_static`.
pub const ACCEPT_VERSION_HEADER: &str = "accept-version";

/// A parsed `id:hex_secret` admin API key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    key_id: String,
    secret: Vec<u8>,
}

impl Credential {
    /// Split `raw` on its single colon and hex-decode the secret.
    pub fn parse(raw: &str) -> GhostResult<Self> {
        let (key_id, secret) = raw.split_once(':').ok_or_else(|| {
            GhostError::InvalidCredentialFormat("expected the format 'id:secret'".to_string())
        })?;

        if key_id.is_empty() || secret.is_empty() || secret.contains(':') {
            return Err(GhostError::InvalidCredentialFormat(
                "expected the format 'id:secret'".to_string(),
            ));
        }

        let secret = hex::decode(secret).map_err(|e| {
            GhostError::InvalidCredentialFormat(format!("secret is not valid hex: {}", e))
        })?;

        Ok(Self {
            key_id: key_id.to_string(),
            secret,
        })
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key_id", &self.key_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Claims carried by an admin token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iat: i64,
    pub exp: i64,
    pub aud: String,
}

/// A compact-serialized admin JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken(String);

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mint a token for `credential` valid for [`TOKEN_TTL_SECS`] from now.
///
/// Fails with [`GhostError::InvalidCredentialFormat`] before any signing
/// work when the key cannot be parsed.
pub fn issue_token(credential: &str, audience: &str) -> GhostResult<SignedToken> {
    let credential = Credential::parse(credential)?;
    sign(&credential, audience)
}

fn sign(credential: &Credential, audience: &str) -> GhostResult<SignedToken> {
    let issued_at = Utc::now();
    let expires_at = issued_at + Duration::seconds(TOKEN_TTL_SECS);

    let claims = TokenClaims {
        iat: issued_at.timestamp(),
        exp: expires_at.timestamp(),
        aud: audience.to_string(),
    };

    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(credential.key_id().to_string());

    let token = encode(&header, &claims, &EncodingKey::from_secret(credential.secret()))
        .map_err(|e| GhostError::InvalidCredentialFormat(format!("failed to sign token: {}", e)))?;

    Ok(SignedToken(token))
}

/// Headers attached to every authenticated admin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// `Ghost <token>`.
    pub authorization: String,
    pub accept_version: String,
}

impl AuthHeaders {
    pub fn new(token: &SignedToken, api_version: impl Into<String>) -> Self {
        Self {
            authorization: format!("Ghost {}", token),
            accept_version: api_version.into(),
        }
    }

    /// Convert into a reqwest header map.
    pub fn to_header_map(&self) -> GhostResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&self.authorization)
                .map_err(|_| GhostError::Config("Invalid authorization header value".to_string()))?,
        );
        headers.insert(
            HeaderName::from_static(ACCEPT_VERSION_HEADER),
            HeaderValue::from_str(&self.accept_version)
                .map_err(|_| GhostError::Config("Invalid API version format".to_string()))?,
        );
        Ok(headers)
    }
}

/// Mint a token and wrap it in headers using [`DEFAULT_API_VERSION`].
pub fn build_auth_headers(credential: &str) -> GhostResult<AuthHeaders> {
    build_auth_headers_with_version(credential, DEFAULT_API_VERSION)
}

/// Mint a token and wrap it in headers with an explicit `Accept-Version`.
pub fn build_auth_headers_with_version(credential: &str, api_version: &str) -> GhostResult<AuthHeaders> {
    let token = issue_token(credential, DEFAULT_AUDIENCE)?;
    Ok(AuthHeaders::new(&token, api_version))
}
