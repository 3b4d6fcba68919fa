//! Admin session cookie handling.
//!
//! The session token travels in an httpOnly, SameSite=Strict cookie so the
//! browser-based admin console can hold it without script access.

use axum::http::{header, HeaderMap, HeaderValue};

/// Cookie carrying the admin session token.
pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

/// Builds and reads the admin session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    secure: bool,
    max_age_secs: i64,
}

impl SessionCookie {
    pub fn new(secure: bool, max_age_secs: i64) -> Self {
        Self {
            secure,
            max_age_secs,
        }
    }

    /// Builds the Set-Cookie value carrying a session token.
    pub fn build(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Strict",
            ADMIN_SESSION_COOKIE, token, self.max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Builds the Set-Cookie value that clears the session cookie.
    pub fn build_clear(&self) -> String {
        let mut cookie = format!(
            "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Strict",
            ADMIN_SESSION_COOKIE
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Adds the session cookie to response headers.
    pub fn apply(&self, headers: &mut HeaderMap, token: &str) {
        if let Ok(value) = HeaderValue::from_str(&self.build(token)) {
            headers.append(header::SET_COOKIE, value);
        }
    }

    /// Adds the clearing cookie to response headers (for logout).
    pub fn apply_clear(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.build_clear()) {
            headers.append(header::SET_COOKIE, value);
        }
    }

    /// Extracts the session token from a request's Cookie header.
    pub fn extract(headers: &HeaderMap) -> Option<&str> {
        headers
            .get(header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|cookie_header| {
                cookie_header
                    .split(';')
                    .map(str::trim)
                    .find_map(|cookie| {
                        let (name, value) = cookie.split_once('=')?;
                        (name == ADMIN_SESSION_COOKIE).then_some(value)
                    })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_session_cookie() {
        let cookie = SessionCookie::new(true, 43200).build("tok123.sig");
        assert!(cookie.starts_with("admin_session=tok123.sig"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=43200"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn test_build_without_secure() {
        let cookie = SessionCookie::new(false, 3600).build("tok");
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_build_clear_cookie() {
        let cookie = SessionCookie::new(true, 43200).build_clear();
        assert!(cookie.starts_with("admin_session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_extract_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; admin_session=12345.abcdef; lang=en"),
        );
        assert_eq!(SessionCookie::extract(&headers), Some("12345.abcdef"));
    }

    #[test]
    fn test_extract_missing() {
        let headers = HeaderMap::new();
        assert_eq!(SessionCookie::extract(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(SessionCookie::extract(&headers), None);
    }

    #[test]
    fn test_apply_sets_header() {
        let mut headers = HeaderMap::new();
        SessionCookie::new(false, 60).apply(&mut headers, "tok");
        let value = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(value.starts_with("admin_session=tok"));
    }

    #[test]
    fn test_apply_clear_sets_header() {
        let mut headers = HeaderMap::new();
        SessionCookie::new(false, 60).apply_clear(&mut headers);
        let value = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(value.contains("Max-Age=0"));
    }
}
