use std::collections::HashMap;

use chrono::{Duration, Utc};

use super::CookieStore;

/// Expiry horizon for a cookie: bounded in seconds, or effectively never.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAge {
    Seconds(i64),
    Never,
}

/// Fixed far-future expiry used for non-expiring cookies.
pub const NEVER_EXPIRES: &str = "Fri, 31 Dec 9999 23:59:59 GMT";

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Converts a relative max-age into an absolute HTTP-date expiry string.
/// The `Never` case is a fixed sentinel and does not depend on the clock.
pub fn expires_at(max_age: MaxAge) -> String {
    match max_age {
        MaxAge::Never => NEVER_EXPIRES.to_owned(),
        MaxAge::Seconds(seconds) => (Utc::now() + Duration::seconds(seconds))
            .format(HTTP_DATE)
            .to_string(),
    }
}

/// The boolean authorization flag, stored as a cookie holding the literal
/// string `"true"`. There is no clear operation; the flag only goes away
/// when the cookie does.
pub struct AuthCookie {
    name: String,
    domain: String,
}

impl AuthCookie {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }

    pub fn set_authorization(&self, cookies: &mut dyn CookieStore) {
        cookies.set(
            &self.name,
            "true",
            &expires_at(MaxAge::Never),
            "/",
            &self.domain,
        );
    }

    /// True iff the cookie currently holds exactly `"true"`; absence and
    /// every other value read as unauthorized.
    pub fn get_authorization(&self, cookies: &dyn CookieStore) -> bool {
        cookies.get(&self.name).as_deref() == Some("true")
    }
}

/// In-process cookie store, used by the client commands and in tests.
#[derive(Debug, Default)]
pub struct MemoryCookies(HashMap<String, String>);

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieStore for MemoryCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str, _expires_at: &str, _path: &str, _domain: &str) {
        self.0.insert(name.to_owned(), value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use mockall::predicate::eq;

    use super::*;
    use crate::widget::MockCookieStore;

    #[test]
    fn never_expires_is_a_fixed_sentinel() {
        assert_eq!(expires_at(MaxAge::Never), NEVER_EXPIRES);
        assert_eq!(expires_at(MaxAge::Never), expires_at(MaxAge::Never));
    }

    #[test]
    fn bounded_expiry_tracks_the_clock() {
        let formatted = expires_at(MaxAge::Seconds(60));
        let parsed = NaiveDateTime::parse_from_str(&formatted, HTTP_DATE).unwrap();
        let delta = parsed - Utc::now().naive_utc();
        assert!((55..=65).contains(&delta.num_seconds()), "{formatted}");
    }

    #[test]
    fn set_then_get_round_trips() {
        let auth = AuthCookie::new("gate", "example.com");
        let mut cookies = MemoryCookies::new();
        assert!(!auth.get_authorization(&cookies));
        auth.set_authorization(&mut cookies);
        assert!(auth.get_authorization(&cookies));
    }

    #[test]
    fn only_the_literal_true_counts() {
        let auth = AuthCookie::new("gate", "example.com");
        let mut cookies = MemoryCookies::new();
        cookies.set("gate", "TRUE", NEVER_EXPIRES, "/", "example.com");
        assert!(!auth.get_authorization(&cookies));
        cookies.set("gate", "1", NEVER_EXPIRES, "/", "example.com");
        assert!(!auth.get_authorization(&cookies));
    }

    #[test]
    fn set_authorization_scopes_the_cookie() {
        let auth = AuthCookie::new("gate", "example.com");
        let mut cookies = MockCookieStore::new();
        cookies
            .expect_set()
            .with(
                eq("gate"),
                eq("true"),
                eq(NEVER_EXPIRES),
                eq("/"),
                eq("example.com"),
            )
            .times(1)
            .return_const(());
        auth.set_authorization(&mut cookies);
    }
}
