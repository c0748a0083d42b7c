//! Login credentials.

use crate::domain::validate;
use crate::error::Issue;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub fn parse_credentials(body: &Value) -> Result<Credentials, Vec<Issue>> {
    let mut issues = Vec::new();
    let Some(map) = validate::as_object(body, &mut issues) else {
        return Err(issues);
    };
    let email = validate::required_string(map, "email", 1, 255, &mut issues);
    if let Some(email) = &email {
        validate::check_email("email", email, &mut issues);
    }
    let password = validate::required_string(map, "password", 1, 32, &mut issues);
    match (email, password) {
        (Some(email), Some(password)) if issues.is_empty() => {
            Ok(Credentials { email, password })
        }
        _ => Err(issues),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_credentials_parse() {
        let creds =
            parse_credentials(&json!({"email": "a@b.c", "password": "hunter2"})).unwrap();
        assert_eq!(creds.email, "a@b.c");
    }

    #[test]
    fn password_is_bounded() {
        let long = "x".repeat(33);
        assert!(parse_credentials(&json!({"email": "a@b.c", "password": long})).is_err());
        assert!(parse_credentials(&json!({"email": "a@b.c", "password": ""})).is_err());
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(parse_credentials(&json!({"email": "nope", "password": "pw"})).is_err());
    }
}
