use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use backend_application::commands::auth_commands;
use backend_domain::RuntimeConfig;

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    parse_basic_credentials(headers)
        .map(|(username, password)| {
            auth_commands::validate_credentials(config, &username, &password).is_ok()
        })
        .unwrap_or(false)
}

/// Pulls the credential pair out of a `Basic` Authorization header. Anything
/// malformed decodes to `None`; the caller answers 401, never 500.
pub fn parse_basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Basic ";
    if !value.starts_with(prefix) {
        return None;
    }
    let encoded = value[prefix.len()..].trim();
    let decoded = STANDARD.decode(encoded).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (username, password) = credentials.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    fn basic(credentials: &str) -> String {
        format!("Basic {}", STANDARD.encode(credentials))
    }

    fn test_config() -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            auth_username: "vendsys".to_string(),
            auth_password: "secret".to_string(),
            max_body_bytes: 1024,
            request_timeout_seconds: 5,
        }
    }

    #[test]
    fn decodes_valid_basic_header() {
        let headers = headers_with_auth(&basic("vendsys:secret"));
        let (username, password) = parse_basic_credentials(&headers).expect("credentials");
        assert_eq!(username, "vendsys");
        assert_eq!(password, "secret");
    }

    #[test]
    fn password_may_contain_colons() {
        let headers = headers_with_auth(&basic("vendsys:se:cr:et"));
        let (_, password) = parse_basic_credentials(&headers).expect("credentials");
        assert_eq!(password, "se:cr:et");
    }

    #[test]
    fn rejects_missing_header() {
        assert!(parse_basic_credentials(&HeaderMap::new()).is_none());
    }

    #[test]
    fn rejects_other_schemes() {
        let headers = headers_with_auth("Bearer abcdef");
        assert!(parse_basic_credentials(&headers).is_none());
    }

    #[test]
    fn rejects_invalid_base64() {
        let headers = headers_with_auth("Basic not-base64!!!");
        assert!(parse_basic_credentials(&headers).is_none());
    }

    #[test]
    fn rejects_credentials_without_separator() {
        let headers = headers_with_auth(&basic("vendsyssecret"));
        assert!(parse_basic_credentials(&headers).is_none());
    }

    #[test]
    fn authorize_accepts_configured_pair() {
        let headers = headers_with_auth(&basic("vendsys:secret"));
        assert!(authorize(&test_config(), &headers));
    }

    #[test]
    fn authorize_rejects_wrong_pair() {
        let headers = headers_with_auth(&basic("vendsys:wrong"));
        assert!(!authorize(&test_config(), &headers));
    }
}
