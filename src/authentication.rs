use headers::Cookie;

/// True when the request's cookies carry the gate flag granted by the
/// authenticate endpoint. Only the literal value `"true"` passes.
pub fn is_authorized(cookie: Option<&Cookie>, name: &str) -> bool {
    cookie.and_then(|cookie| cookie.get(name)) == Some("true")
}

#[cfg(test)]
mod tests {
    use headers::HeaderMapExt;
    use http::header::COOKIE;
    use http::HeaderMap;

    use super::*;

    fn cookie_header(value: &str) -> Cookie {
        let mut map = HeaderMap::new();
        map.insert(COOKIE, value.parse().unwrap());
        map.typed_get::<Cookie>().unwrap()
    }

    #[test]
    fn the_literal_true_is_authorized() {
        let cookie = cookie_header("gate=true");
        assert!(is_authorized(Some(&cookie), "gate"));
    }

    #[test]
    fn other_values_and_absence_are_not() {
        let cookie = cookie_header("gate=TRUE; other=true");
        assert!(!is_authorized(Some(&cookie), "gate"));
        assert!(!is_authorized(None, "gate"));
    }
}
