//! Session cookie issuing and parsing
//!
//! The cookie carries only the signed session id; everything else lives in
//! the session store.

use axum::http::{header, HeaderMap, HeaderValue};
use scout_core::domain::Session;
use scout_security::CookieSigner;
use scout_shared::config::SessionSettings;
use scout_shared::AppError;

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct SessionCookies {
    signer: CookieSigner,
    name: String,
    secure: bool,
}

impl SessionCookies {
    pub fn new(settings: &SessionSettings) -> Result<Self, AppError> {
        let signer = CookieSigner::new(settings.secret.as_bytes())
            .map_err(|e| AppError::InvalidConfig(format!("session.secret: {}", e)))?;
        Ok(Self {
            signer,
            name: settings.cookie_name.clone(),
            secure: settings.secure,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Set-Cookie` value for a freshly opened session.
    pub fn issue(&self, session: &Session) -> Result<HeaderValue, ApiError> {
        self.header(&self.signer.sign(&session.id), session.remaining_seconds())
    }

    /// `Set-Cookie` value that makes the browser drop the cookie.
    pub fn clear(&self) -> Result<HeaderValue, ApiError> {
        self.header("", 0)
    }

    fn header(&self, value: &str, max_age: i64) -> Result<HeaderValue, ApiError> {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::try_from(cookie).map_err(|e| ApiError::InternalError(e.to_string()))
    }

    /// Verified session id from the request's `Cookie` headers. Cookies with
    /// a bad signature are ignored.
    pub fn session_id(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == self.name)
            .find_map(|(_, value)| self.signer.verify(value).map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_shared::config::SessionBackend;
    use uuid::Uuid;

    fn settings(secure: bool) -> SessionSettings {
        SessionSettings {
            backend: SessionBackend::Memory,
            cookie_name: "scout.sid".into(),
            secret: "x".repeat(32),
            ttl_seconds: 60,
            secure,
        }
    }

    #[test]
    fn test_issue_and_read_back() {
        let cookies = SessionCookies::new(&settings(false)).unwrap();
        let session = Session::new("abc".into(), Uuid::new_v4(), "e".into(), Uuid::new_v4(), "g".into(), 60);
        let set_cookie = cookies.issue(&session).unwrap();
        let set_cookie = set_cookie.to_str().unwrap();
        assert!(set_cookie.starts_with("scout.sid=abc."));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(!set_cookie.contains("Secure"));

        let pair = set_cookie.split(';').next().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(&format!("theme=dark; {}", pair)).unwrap());
        assert_eq!(cookies.session_id(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_forged_cookie_ignored() {
        let cookies = SessionCookies::new(&settings(true)).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("scout.sid=abc.deadbeef"));
        assert_eq!(cookies.session_id(&headers), None);
        assert!(cookies.clear().unwrap().to_str().unwrap().ends_with("Max-Age=0; Secure"));
    }
}
