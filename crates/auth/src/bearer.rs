//! Bearer token extraction helpers
//!
//! Login tokens arrive either in the `Authorization` header or, for browser
//! clients, in an HttpOnly `access_token` cookie set at login.

use axum::http::HeaderValue;

/// Extract a bearer token from an `Authorization` header value.
pub fn bearer_from_header(header: &HeaderValue) -> Option<String> {
    let header_str = header.to_str().ok()?;
    header_str.strip_prefix("Bearer ").map(str::to_string)
}

/// Extract the `access_token` value from a `Cookie` header.
///
/// Accepts a bare token or one carrying a `Bearer ` prefix.
pub fn token_from_cookie_header(header: &HeaderValue) -> Option<String> {
    let header_str = header.to_str().ok()?;

    header_str.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name != "access_token" {
            return None;
        }
        let value = value.strip_prefix("Bearer ").unwrap_or(value);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_from_header() {
        // Valid bearer token
        let header = HeaderValue::from_static("Bearer abc123");
        assert_eq!(bearer_from_header(&header), Some("abc123".to_string()));

        // Missing scheme
        let header = HeaderValue::from_static("abc123");
        assert_eq!(bearer_from_header(&header), None);

        // Basic auth (wrong type)
        let header = HeaderValue::from_static("Basic abc123");
        assert_eq!(bearer_from_header(&header), None);
    }

    #[test]
    fn test_token_from_cookie_header() {
        let header = HeaderValue::from_static("access_token=abc123");
        assert_eq!(
            token_from_cookie_header(&header),
            Some("abc123".to_string())
        );

        // Among other cookies
        let header = HeaderValue::from_static("theme=dark; access_token=abc123; lang=en");
        assert_eq!(
            token_from_cookie_header(&header),
            Some("abc123".to_string())
        );

        // Bearer prefix inside the cookie value is stripped
        let header = HeaderValue::from_static("access_token=Bearer abc123");
        assert_eq!(
            token_from_cookie_header(&header),
            Some("abc123".to_string())
        );

        // No access_token cookie
        let header = HeaderValue::from_static("theme=dark; lang=en");
        assert_eq!(token_from_cookie_header(&header), None);

        // Empty value
        let header = HeaderValue::from_static("access_token=");
        assert_eq!(token_from_cookie_header(&header), None);
    }
}
