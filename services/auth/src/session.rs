//! Session cookie handling
//!
//! The session token travels in an HTTP-only cookie. Logging out only asks
//! the browser to drop it; the token itself stays valid until it expires.

use axum_extra::extract::cookie::{Cookie, SameSite};
use common::config::RuntimeMode;

use crate::jwt::SESSION_TOKEN_LIFETIME_SECS;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "jwt-netflix";

/// Attributes applied to the session cookie
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CookieConfig {
    pub secure: bool,
    pub same_site: SameSite,
    pub max_age_secs: u64,
}

impl CookieConfig {
    /// Production sends the cookie cross-site over TLS only; development
    /// keeps it strictly same-site.
    pub fn for_mode(mode: RuntimeMode) -> Self {
        let (secure, same_site) = if mode.is_production() {
            (true, SameSite::None)
        } else {
            (false, SameSite::Strict)
        };

        CookieConfig {
            secure,
            same_site,
            max_age_secs: SESSION_TOKEN_LIFETIME_SECS,
        }
    }

    /// Cookie carrying a freshly issued session token
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .path("/")
            .max_age(time::Duration::seconds(self.max_age_secs as i64))
            .build()
    }

    /// Cookie instructing the browser to discard the session token
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .path("/")
            .removal()
            .build()
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self::for_mode(RuntimeMode::Development)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_cookie_attributes() {
        let cookie = CookieConfig::for_mode(RuntimeMode::Development).session_cookie("tok".into());
        let header = cookie.to_string();

        assert_eq!(cookie.name(), "jwt-netflix");
        assert_eq!(cookie.value(), "tok");
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Strict"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Max-Age=1296000"));
        assert!(!header.contains("Secure"));
    }

    #[test]
    fn test_production_cookie_attributes() {
        let header = CookieConfig::for_mode(RuntimeMode::Production)
            .session_cookie("tok".into())
            .to_string();

        assert!(header.contains("Secure"));
        assert!(header.contains("SameSite=None"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = CookieConfig::default().removal_cookie();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
