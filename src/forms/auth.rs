use serde::Deserialize;
use validator::Validate;

use crate::domain::user::UserRole;

/// Form payload emitted by the mock sign-in dialog.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInForm {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Optional role label; unknown labels fall back to customer.
    #[serde(default)]
    pub role: Option<String>,
}

/// Sanitized sign-in request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
}

impl SignInForm {
    /// Trims the email, then validates; a whitespace-only email is rejected.
    pub fn into_request(mut self) -> Result<SignInRequest, validator::ValidationErrors> {
        self.email = self.email.trim().to_string();
        self.validate()?;

        let role = self
            .role
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| value.parse::<UserRole>().ok());

        Ok(SignInRequest {
            email: self.email,
            password: self.password,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, role: Option<&str>) -> SignInForm {
        SignInForm {
            email: email.to_string(),
            password: "secret".to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn request_keeps_known_role() {
        let request = form(" seller@example.com ", Some("seller"))
            .into_request()
            .expect("valid form");

        assert_eq!(request.email, "seller@example.com");
        assert_eq!(request.role, Some(UserRole::Seller));
    }

    #[test]
    fn unknown_role_is_dropped() {
        let request = form("a@example.com", Some("owner")).into_request().expect("valid form");

        assert_eq!(request.role, None);
    }

    #[test]
    fn empty_email_is_rejected() {
        assert!(form("", None).into_request().is_err());
    }

    #[test]
    fn whitespace_only_email_is_rejected() {
        assert!(form("   ", None).into_request().is_err());
        assert!(form("\t\n", Some("admin")).into_request().is_err());
    }
}
