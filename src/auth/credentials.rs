//! Basic authentication header parsing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Email and plaintext password presented by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Parse an `Authorization: Basic <base64(email:password)>` header value.
///
/// Returns `None` when the header is absent, the scheme is not `Basic`,
/// the second token is missing, the payload is not base64 or not UTF-8,
/// there is no `:` separator, or either half is empty. The password is
/// everything after the first `:`.
pub fn parse_basic_auth(header: Option<&str>) -> Option<Credentials> {
    let mut parts = header?.split_whitespace();
    let scheme = parts.next()?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let encoded = parts.next()?;

    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;

    if email.is_empty() || password.is_empty() {
        return None;
    }

    Some(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn test_parse_valid_header() {
        let creds = parse_basic_auth(Some(&basic("a@b.com:pw"))).unwrap();
        assert_eq!(creds.email, "a@b.com");
        assert_eq!(creds.password, "pw");
    }

    #[test]
    fn test_password_may_contain_colon() {
        let creds = parse_basic_auth(Some(&basic("a@b.com:p:w"))).unwrap();
        assert_eq!(creds.password, "p:w");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let header = format!("basic {}", STANDARD.encode("a@b.com:pw"));
        assert!(parse_basic_auth(Some(&header)).is_some());
    }

    #[test]
    fn test_rejects_malformed_headers() {
        assert!(parse_basic_auth(None).is_none());
        assert!(parse_basic_auth(Some("")).is_none());
        assert!(parse_basic_auth(Some("Basic")).is_none());
        assert!(parse_basic_auth(Some("Basic !!!not-base64!!!")).is_none());
        assert!(parse_basic_auth(Some(&basic("no-colon"))).is_none());
        assert!(parse_basic_auth(Some(&basic(":pw"))).is_none());
        assert!(parse_basic_auth(Some(&basic("a@b.com:"))).is_none());

        let bearer = format!("Bearer {}", STANDARD.encode("a@b.com:pw"));
        assert!(parse_basic_auth(Some(&bearer)).is_none());
    }

    #[test]
    fn test_rejects_non_utf8() {
        let header = format!("Basic {}", STANDARD.encode([0xff, 0xfe, b':', b'x']));
        assert!(parse_basic_auth(Some(&header)).is_none());
    }
}
