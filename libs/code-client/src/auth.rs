//! HTTP Basic authentication

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Value of the `Authorization` header for the given credentials.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header() {
        assert_eq!(basic_auth("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_basic_auth_keeps_colons_in_password() {
        assert_eq!(basic_auth("a", "b:c"), "Basic YTpiOmM=");
    }
}
