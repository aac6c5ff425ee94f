use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// The single value that authorizes requests: base64 of `username:password`.
///
/// Derived once at login and sent as `Authorization: Basic <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn derive(username: &str, password: &str) -> Self {
        Credential(STANDARD.encode(format!("{username}:{password}")))
    }

    /// Wrap a token that was derived earlier, e.g. read back from a cookie.
    pub fn from_token(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn authorization(&self) -> String {
        format!("Basic {}", self.0)
    }

    /// Split the token back into `(username, password)`.
    pub fn decode(&self) -> Option<(String, String)> {
        let bytes = STANDARD.decode(&self.0).ok()?;
        let pair = String::from_utf8(bytes).ok()?;
        let (username, password) = pair.split_once(':')?;
        Some((username.to_string(), password.to_string()))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_basic_token() {
        let credential = Credential::derive("admin", "admin");
        assert_eq!(credential.token(), "YWRtaW46YWRtaW4=");
        assert_eq!(credential.authorization(), "Basic YWRtaW46YWRtaW4=");
    }

    #[test]
    fn decode_splits_on_first_colon() {
        let credential = Credential::derive("ada", "pa:ss");
        assert_eq!(credential.decode(), Some(("ada".to_string(), "pa:ss".to_string())));
        assert_eq!(Credential::from_token("%%%").decode(), None);
    }

    #[test]
    fn debug_hides_token() {
        let credential = Credential::derive("ada", "secret");
        assert_eq!(format!("{credential:?}"), "Credential(..)");
    }
}
