//! Session cookie authentication
//!
//! Token format: `<expiry unix secs>.<nonce hex>.<hmac-sha256 hex>`, where the
//! MAC covers `<expiry>.<nonce>`. Tokens are stateless; there is no per-user
//! identity, only "knows the access code".

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::config::Config;
use crate::error::AppError;
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "auth-token";

/// Session lifetime (24 hours)
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Access gate settings
pub struct SessionSettings {
    access_code: String,
    secret: Vec<u8>,
    secure_cookies: bool,
}

impl SessionSettings {
    pub fn new(access_code: String, secret: String, secure_cookies: bool) -> Self {
        Self {
            access_code,
            secret: secret.into_bytes(),
            secure_cookies,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.access_code.clone(),
            config.session_secret.clone(),
            config.secure_cookies,
        )
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
    }

    /// Compare a submitted access code in constant time
    pub fn check_access_code(&self, submitted: &str) -> bool {
        let mut expected = self.mac();
        expected.update(self.access_code.as_bytes());
        let expected = expected.finalize().into_bytes();

        let mut candidate = self.mac();
        candidate.update(submitted.as_bytes());
        candidate.verify_slice(&expected).is_ok()
    }

    /// Issue a session token valid for `SESSION_TTL_SECS` from `now`
    pub fn issue_token(&self, now: DateTime<Utc>) -> String {
        let expires = (now + Duration::seconds(SESSION_TTL_SECS)).timestamp();
        let nonce: [u8; 16] = rand::thread_rng().gen();
        let payload = format!("{}.{}", expires, hex::encode(nonce));

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        format!("{}.{}", payload, signature)
    }

    /// Check a token's signature and expiry
    pub fn verify_token(&self, token: &str, now: DateTime<Utc>) -> bool {
        let Some((payload, signature)) = token.rsplit_once('.') else {
            return false;
        };
        let Some((expires, _nonce)) = payload.split_once('.') else {
            return false;
        };
        let Ok(signature) = hex::decode(signature) else {
            return false;
        };

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            return false;
        }

        expires
            .parse::<i64>()
            .map(|expires| now.timestamp() < expires)
            .unwrap_or(false)
    }

    /// `Set-Cookie` value carrying a session token
    pub fn session_cookie(&self, token: &str) -> String {
        self.cookie(token, SESSION_TTL_SECS)
    }

    /// `Set-Cookie` value that removes the session cookie
    pub fn clear_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, value, max_age
        );
        if self.secure_cookies {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Extract the session token from the Cookie header
fn extract_session_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

/// Session middleware
///
/// Rejects requests without a valid, unexpired session cookie.
pub async fn session_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_session_token(&request).ok_or(AppError::Unauthorized)?;

    if !state.sessions.verify_token(token, Utc::now()) {
        tracing::debug!("Rejected invalid or expired session token");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
