use tracing::warn;

use backend_domain::RuntimeConfig;

use crate::AppError;

/// Validates a decoded Basic credential pair against the configured values.
pub fn validate_credentials(
    config: &RuntimeConfig,
    username: &str,
    password: &str,
) -> Result<(), AppError> {
    if username == config.auth_username && password == config.auth_password {
        Ok(())
    } else {
        warn!(username, "authentication failed");
        Err(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn accepts_configured_credentials() {
        let config = test_config();
        assert!(validate_credentials(&config, "vendsys", "secret").is_ok());
    }

    #[test]
    fn rejects_wrong_password() {
        let config = test_config();
        let err = validate_credentials(&config, "vendsys", "wrong").expect_err("wrong password");
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn rejects_unknown_username() {
        let config = test_config();
        let err = validate_credentials(&config, "intruder", "secret").expect_err("wrong username");
        assert!(matches!(err, AppError::Unauthorized));
    }
}
