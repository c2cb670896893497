//! Sessions carried in the private `admin_session` cookie.
//!
//! The cookie value is the JSON [`SessionClaims`], encrypted and
//! authenticated by [`PrivateCookieJar`] under a key derived from
//! `SESSION_SECRET`. Sessions are stateless; an account deleted after login is
//! caught when the principal is resolved.

use anyhow::{Result, bail};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::services::permissions::Principal;

use crate::error::WebError;

pub const SESSION_COOKIE: &str = "admin_session";

/// `Key::derive_from` refuses shorter master keys.
const MIN_MASTER_KEY_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub principal: Principal,
    /// Unix timestamp in seconds
    pub exp: i64,
}

#[derive(Clone)]
pub struct SessionKey {
    key: Key,
    ttl_seconds: i64,
    secure: bool,
}

impl SessionKey {
    pub fn new(secret: &[u8], ttl_seconds: i64, secure: bool) -> Result<Self> {
        if ttl_seconds <= 0 {
            bail!("session lifetime must be positive");
        }
        if secret.len() < MIN_MASTER_KEY_LEN {
            bail!("session secret must be at least {MIN_MASTER_KEY_LEN} bytes");
        }

        Ok(Self {
            key: Key::derive_from(secret),
            ttl_seconds,
            secure,
        })
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Adds a session cookie for `principal` to the jar.
    pub fn open(
        &self,
        jar: PrivateCookieJar,
        principal: Principal,
        now: DateTime<Utc>,
    ) -> Result<PrivateCookieJar, WebError> {
        let claims = SessionClaims {
            principal,
            exp: now.timestamp() + self.ttl_seconds,
        };
        let value = serde_json::to_string(&claims)
            .map_err(|e| WebError::InternalServerError(format!("session encoding: {}", e)))?;

        let cookie = Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(self.ttl_seconds))
            .secure(self.secure);

        Ok(jar.add(cookie))
    }

    pub fn close(&self, jar: PrivateCookieJar) -> PrivateCookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }
}

/// Claims of a session cookie that decrypts under the jar's key and has not
/// expired.
pub fn read_claims(jar: &PrivateCookieJar, now: DateTime<Utc>) -> Option<SessionClaims> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let claims: SessionClaims = serde_json::from_str(cookie.value()).ok()?;

    (claims.exp > now.timestamp()).then_some(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, HeaderValue, header},
        response::IntoResponse,
    };
    use chrono::Duration;
    use uuid::Uuid;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn session_key() -> SessionKey {
        SessionKey::new(SECRET, 3600, true).unwrap()
    }

    fn empty_jar(key: &SessionKey) -> PrivateCookieJar {
        PrivateCookieJar::new(key.key().clone())
    }

    /// The `Set-Cookie` header a jar produces, as the browser would store it.
    fn set_cookie_header(jar: PrivateCookieJar) -> String {
        let response = jar.into_response();
        response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .to_string()
    }

    /// Reads the jar a browser would send back after storing `set_cookie`.
    fn returned_jar(set_cookie: &str, key: &SessionKey) -> PrivateCookieJar {
        let stored = Cookie::parse(set_cookie).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}", stored.name(), stored.value()))
                .unwrap(),
        );
        PrivateCookieJar::from_headers(&headers, key.key().clone())
    }

    #[test]
    fn test_session_survives_the_browser_round_trip() {
        let key = session_key();
        let principal = Principal::Captain(Uuid::new_v4());
        let now = Utc::now();

        let set_cookie = set_cookie_header(key.open(empty_jar(&key), principal, now).unwrap());
        let claims = read_claims(&returned_jar(&set_cookie, &key), now).unwrap();

        assert_eq!(claims.principal, principal);
        assert_eq!(claims.exp, now.timestamp() + 3600);
    }

    #[test]
    fn test_cookie_attributes() {
        let key = session_key();
        let set_cookie = set_cookie_header(
            key.open(empty_jar(&key), Principal::Admin(Uuid::new_v4()), Utc::now())
                .unwrap(),
        );

        let cookie = Cookie::parse(set_cookie.as_str()).unwrap();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
        assert!(!cookie.value().starts_with('{'));
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let key = session_key();
        let now = Utc::now();
        let jar = key
            .open(empty_jar(&key), Principal::Admin(Uuid::new_v4()), now)
            .unwrap();

        assert!(read_claims(&jar, now + Duration::seconds(3600)).is_none());
    }

    #[test]
    fn test_cookie_from_other_secret_is_rejected() {
        let key = session_key();
        let other = SessionKey::new(b"ffffffffffffffffffffffffffffffff", 3600, true).unwrap();
        let now = Utc::now();

        let set_cookie = set_cookie_header(
            other
                .open(empty_jar(&other), Principal::Admin(Uuid::new_v4()), now)
                .unwrap(),
        );

        assert!(read_claims(&returned_jar(&set_cookie, &key), now).is_none());
    }

    #[test]
    fn test_plain_identifier_cookie_is_rejected() {
        let key = session_key();

        for value in ["super_admin", "admin_1", r#"{"principal":{"kind":"admin"}}"#] {
            let jar = returned_jar(&format!("{}={}", SESSION_COOKIE, value), &key);
            assert!(read_claims(&jar, Utc::now()).is_none());
        }
    }

    #[test]
    fn test_logout_expires_the_cookie() {
        let key = session_key();
        let opened = set_cookie_header(
            key.open(empty_jar(&key), Principal::Admin(Uuid::new_v4()), Utc::now())
                .unwrap(),
        );

        let set_cookie = set_cookie_header(key.close(returned_jar(&opened, &key)));

        let cookie = Cookie::parse(set_cookie.as_str()).unwrap();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }

    #[test]
    fn test_short_secret_and_non_positive_lifetime_are_refused() {
        assert!(SessionKey::new(b"too-short", 3600, false).is_err());
        assert!(SessionKey::new(SECRET, 0, false).is_err());
    }
}
