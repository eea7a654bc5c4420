use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Customer,
    Seller,
    Admin,
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "customer" => Ok(UserRole::Customer),
            "seller" => Ok(UserRole::Seller),
            "admin" => Ok(UserRole::Admin),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl User {
    /// Derive a user from an email address alone.
    ///
    /// The id is the normalized email so that the same address always maps to
    /// the same cart, and the display name is the part before the `@`.
    #[must_use]
    pub fn from_email(email: &str, role: UserRole) -> Self {
        let email = email.trim();
        let name = email.split('@').next().unwrap_or_default().to_string();
        Self {
            id: format!("user-{}", email.to_lowercase()),
            email: email.to_string(),
            name,
            role,
        }
    }
}
