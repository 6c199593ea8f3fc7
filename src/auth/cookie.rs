use axum::http::{header, HeaderMap};

pub const TOKEN_COOKIE: &str = "token";

pub fn token_cookie(token: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        TOKEN_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_token_cookie(secure: bool) -> String {
    token_cookie("", 0, secure)
}

pub fn get_cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == name && !val.is_empty() {
                Some(val)
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn token_cookie_is_http_only() {
        let c = token_cookie("abc", 3600, false);
        assert!(c.starts_with("token=abc;"));
        assert!(c.contains("HttpOnly"));
        assert!(c.contains("Max-Age=3600"));
        assert!(!c.contains("Secure"));
        assert!(token_cookie("abc", 1, true).ends_with("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let c = clear_token_cookie(false);
        assert!(c.starts_with("token=;"));
        assert!(c.contains("Max-Age=0"));
    }

    #[test]
    fn finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; token=xyz.abc.def; lang=en"),
        );
        assert_eq!(get_cookie_value(&headers, "token"), Some("xyz.abc.def"));
        assert_eq!(get_cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn empty_cookie_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token="));
        assert_eq!(get_cookie_value(&headers, "token"), None);
    }
}
