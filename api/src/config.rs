use std::env;

#[derive(Clone)]
pub struct Config {
    /// Cosmic API base URL
    pub cosmic_api_url: String,
    pub cosmic_bucket_slug: String,
    pub cosmic_read_key: String,
    pub cosmic_write_key: String,
    /// Resend API base URL
    pub resend_api_url: String,
    /// Resend API key. Without it the server runs but campaign sends fail.
    pub resend_api_key: Option<String>,
    /// Sender for campaign email, e.g. `Email Marketing <noreply@example.com>`
    pub email_from: String,
    /// Shared access code for the dashboard login
    pub access_code: String,
    /// Secret used to sign session cookies
    pub session_secret: String,
    /// Mark the session cookie `Secure` (HTTPS only)
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            cosmic_api_url: env::var("COSMIC_API_URL")
                .unwrap_or_else(|_| "https://api.cosmicjs.com".to_string()),
            cosmic_bucket_slug: env::var("COSMIC_BUCKET_SLUG")
                .expect("COSMIC_BUCKET_SLUG must be set"),
            cosmic_read_key: env::var("COSMIC_READ_KEY").expect("COSMIC_READ_KEY must be set"),
            cosmic_write_key: env::var("COSMIC_WRITE_KEY").expect("COSMIC_WRITE_KEY must be set"),
            resend_api_url: env::var("RESEND_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_string()),
            resend_api_key: env::var("RESEND_API_KEY").ok().filter(|k| !k.is_empty()),
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "Email Marketing <noreply@yourdomain.com>".to_string()),
            access_code: env::var("ACCESS_CODE").expect("ACCESS_CODE must be set"),
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| "dev-session-secret-not-for-production".to_string()),
            secure_cookies: env::var("SECURE_COOKIES")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Check if outbound email is configured
    pub fn email_enabled(&self) -> bool {
        self.resend_api_key.is_some()
    }
}
