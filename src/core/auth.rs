/// Credential verification for the login gate
///
/// Verification goes through the `Authenticator` trait so the backing check
/// can be swapped. The shipped implementation compares against a username and
/// SHA-256 password digest from the config file. It is a local convenience
/// gate, not a security boundary.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;
use thiserror::Error;

use crate::utils::to_hex;

pub const DEFAULT_USERNAME: &str = "admin@innaesim.com";
const DEFAULT_PASSWORD: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure,
}

#[cfg_attr(test, mockall::automock)]
pub trait Authenticator: Send + Sync {
    fn verify(&self, credentials: &Credentials) -> AuthOutcome;
}

/// Messages shown on the login form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Please fill in all fields")]
    EmptyFields,

    // Same message for unknown user and wrong password
    #[error("Invalid credentials.")]
    InvalidCredentials,
}

/// Hex SHA-256 of a password, as stored in the config file
pub fn password_digest(password: &str) -> String {
    to_hex(&Sha256::digest(password.as_bytes()))
}

/// Auth section of the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub username: String,
    pub password_sha256: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password_sha256: password_digest(DEFAULT_PASSWORD),
        }
    }
}

pub struct ConfiguredAuthenticator {
    username: String,
    password_sha256: String,
}

impl ConfiguredAuthenticator {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            username: settings.username.clone(),
            password_sha256: settings.password_sha256.to_lowercase(),
        }
    }
}

impl Authenticator for ConfiguredAuthenticator {
    fn verify(&self, credentials: &Credentials) -> AuthOutcome {
        if credentials.username == self.username
            && password_digest(&credentials.password) == self.password_sha256
        {
            AuthOutcome::Success
        } else {
            AuthOutcome::Failure
        }
    }
}

/// Reject empty fields before anything else
pub fn validate_form(username: &str, password: &str) -> Result<Credentials, LoginError> {
    if username.is_empty() || password.is_empty() {
        return Err(LoginError::EmptyFields);
    }
    Ok(Credentials::new(username, password))
}

/// Validate, wait out the sign-in delay, then verify.
/// Returns the signed-in username on success.
pub async fn attempt_login(
    authenticator: &dyn Authenticator,
    username: &str,
    password: &str,
    delay: Duration,
) -> Result<String, LoginError> {
    let credentials = validate_form(username, password)?;

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match authenticator.verify(&credentials) {
        AuthOutcome::Success => {
            tracing::info!(user = %credentials.username, "login succeeded");
            Ok(credentials.username)
        }
        AuthOutcome::Failure => {
            tracing::warn!(user = %credentials.username, "login rejected");
            Err(LoginError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_digest() {
        assert_eq!(
            password_digest("admin"),
            "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918"
        );
    }

    #[test]
    fn test_default_settings_accept_demo_pair() {
        let auth = ConfiguredAuthenticator::new(&AuthSettings::default());
        assert_eq!(auth.verify(&Credentials::new("admin@innaesim.com", "admin")), AuthOutcome::Success);
        assert_eq!(auth.verify(&Credentials::new("admin@innaesim.com", "Admin")), AuthOutcome::Failure);
        assert_eq!(auth.verify(&Credentials::new("root", "admin")), AuthOutcome::Failure);
    }

    #[test]
    fn test_uppercase_digest_in_config() {
        let settings = AuthSettings {
            username: "ops".to_string(),
            password_sha256: password_digest("hunter2").to_uppercase(),
        };
        let auth = ConfiguredAuthenticator::new(&settings);
        assert_eq!(auth.verify(&Credentials::new("ops", "hunter2")), AuthOutcome::Success);
    }

    #[test]
    fn test_validate_form() {
        assert_eq!(validate_form("", "x"), Err(LoginError::EmptyFields));
        assert_eq!(validate_form("x", ""), Err(LoginError::EmptyFields));
        assert_eq!(validate_form("a", "b"), Ok(Credentials::new("a", "b")));
        assert_eq!(LoginError::EmptyFields.to_string(), "Please fill in all fields");
        assert_eq!(LoginError::InvalidCredentials.to_string(), "Invalid credentials.");
    }

    #[tokio::test]
    async fn test_empty_fields_skip_authenticator() {
        let mut auth = MockAuthenticator::new();
        auth.expect_verify().times(0);

        let result = attempt_login(&auth, "", "", Duration::ZERO).await;
        assert_eq!(result, Err(LoginError::EmptyFields));
    }

    #[tokio::test]
    async fn test_attempt_login_uses_authenticator() {
        let mut auth = MockAuthenticator::new();
        auth.expect_verify()
            .withf(|c| c.username == "ops")
            .times(1)
            .return_const(AuthOutcome::Success);

        let result = attempt_login(&auth, "ops", "pw", Duration::ZERO).await;
        assert_eq!(result, Ok("ops".to_string()));
    }

    #[tokio::test]
    async fn test_rejection_is_generic() {
        let mut auth = MockAuthenticator::new();
        auth.expect_verify().return_const(AuthOutcome::Failure);

        let result = attempt_login(&auth, "nobody", "pw", Duration::ZERO).await;
        assert_eq!(result, Err(LoginError::InvalidCredentials));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_in_delay_is_awaited() {
        let auth = ConfiguredAuthenticator::new(&AuthSettings::default());
        let start = tokio::time::Instant::now();

        let result = attempt_login(&auth, DEFAULT_USERNAME, "admin", Duration::from_secs(1)).await;

        assert!(result.is_ok());
        assert!(start.elapsed() >= Duration::from_secs(1));
    }
}
