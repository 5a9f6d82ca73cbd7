//! Session cookie construction and token lookup.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use portal_core::config::{AppConfig, SameSitePolicy};

/// Reads the session token: cookie first, then `Authorization: Bearer`.
pub fn token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

fn base_cookie(config: &AppConfig, value: String) -> Cookie<'static> {
    let same_site = match config.session.same_site {
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::Strict => SameSite::Strict,
    };
    Cookie::build((config.session.cookie_name.clone(), value))
        .http_only(true)
        .path("/")
        .same_site(same_site)
        .secure(config.cookie_secure())
        .build()
}

/// Cookie carrying a freshly issued token, living as long as the token.
pub fn session_cookie(config: &AppConfig, token: &str) -> Cookie<'static> {
    let mut cookie = base_cookie(config, token.to_string());
    cookie.set_max_age(time::Duration::minutes(config.session.ttl_minutes()));
    cookie
}

/// Cookie that overwrites the session cookie and expires immediately.
pub fn cleared_cookie(config: &AppConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(config, String::new());
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}
