use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::settings::AppConfig;

/// Username and password decoded from an `Authorization: Basic` header.
pub struct BasicCredentials {
    pub username: String,
    pub password: Zeroizing<String>,
}

impl BasicCredentials {
    /// Parses the raw header value. `None` for any other scheme or malformed payload.
    pub fn from_header(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = Zeroizing::new(STANDARD.decode(encoded.trim()).ok()?);
        let decoded = std::str::from_utf8(&decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: Zeroizing::new(password.to_string()),
        })
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The single account allowed to call `/api`.
#[derive(Clone)]
pub struct ApiCredentials {
    username: Zeroizing<String>,
    password: Zeroizing<String>,
}

impl ApiCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Zeroizing::new(username.into()),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Both fields are always compared so the timing does not reveal which one was wrong.
    pub fn verify(&self, candidate: &BasicCredentials) -> bool {
        let username_ok = self.username.as_bytes().ct_eq(candidate.username.as_bytes());
        let password_ok = self.password.as_bytes().ct_eq(candidate.password.as_bytes());
        bool::from(username_ok & password_ok)
    }
}

impl From<&AppConfig> for ApiCredentials {
    fn from(config: &AppConfig) -> Self {
        ApiCredentials::new(config.api_username.clone(), config.api_password.clone())
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("username", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(user: &str, pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
    }

    #[test]
    fn parses_basic_header() {
        let creds = BasicCredentials::from_header(&header("admin", "s3cr:et")).unwrap();

        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password.as_str(), "s3cr:et");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let value = header("admin", "password").replacen("Basic", "bAsIc", 1);
        assert!(BasicCredentials::from_header(&value).is_some());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(BasicCredentials::from_header("Bearer abc.def.ghi").is_none());
        assert!(BasicCredentials::from_header("Basic !!!not-base64!!!").is_none());
        assert!(BasicCredentials::from_header(&format!("Basic {}", STANDARD.encode("nocolon"))).is_none());
        assert!(BasicCredentials::from_header("Basic").is_none());
    }

    #[test]
    fn verify_requires_both_fields() {
        let expected = ApiCredentials::new("admin", "password");

        let ok = BasicCredentials::from_header(&header("admin", "password")).unwrap();
        let wrong_pass = BasicCredentials::from_header(&header("admin", "passwor")).unwrap();
        let wrong_user = BasicCredentials::from_header(&header("root", "password")).unwrap();

        assert!(expected.verify(&ok));
        assert!(!expected.verify(&wrong_pass));
        assert!(!expected.verify(&wrong_user));
    }

    #[test]
    fn debug_output_is_redacted() {
        let expected = ApiCredentials::new("admin", "hunter2");
        assert!(!format!("{:?}", expected).contains("hunter2"));
    }
}
