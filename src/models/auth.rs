// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// --- Roles ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[serde(alias = "admin")]
    Admin,
    #[serde(alias = "provider")]
    Provider,
    #[serde(alias = "customer")]
    Customer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Provider => "PROVIDER",
            Role::Customer => "CUSTOMER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "PROVIDER" => Some(Role::Provider),
            "CUSTOMER" => Some(Role::Customer),
            _ => None,
        }
    }
}

// --- Session (auth service) ---

// The user block of `GET {AUTH_URL}/get-session`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub email_verified: bool,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEnvelope {
    pub user: SessionUser,
}

// --- Profile (`/api/users/profile`) ---
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    pub id: Option<String>,
    pub restaurant_name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub is_open: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub email_verified: bool,
    pub provider_profile: Option<ProviderProfile>,
}

impl Profile {
    /// Id of the restaurant owned by this account, when one was set up.
    pub fn provider_id(&self) -> Option<&str> {
        self.provider_profile
            .as_ref()
            .and_then(|p| p.id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

// Admin user listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<Role>,
    #[serde(default)]
    pub email_verified: bool,
    pub created_at: Option<DateTime<Utc>>,
}

// ---
// Forms
// ---

fn validate_signup_role(role: &str) -> Result<(), ValidationError> {
    match Role::parse(role) {
        Some(Role::Customer) | Some(Role::Provider) => Ok(()),
        _ => {
            let mut err = ValidationError::new("role");
            err.message = Some("Choose either CUSTOMER or PROVIDER.".into());
            Err(err)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "Email is required."))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
    #[validate(custom(function = "validate_signup_role"))]
    pub role: String,
}

impl RegisterPayload {
    /// Body of `POST {AUTH_URL}/sign-up/email`.
    pub fn to_sign_up(&self) -> SignUpData {
        SignUpData {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: Role::parse(&self.role).unwrap_or(Role::Customer),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileUpdatePayload {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

// Body of `PATCH /api/users/profile`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<&ProfileUpdatePayload> for ProfileUpdateData {
    fn from(payload: &ProfileUpdatePayload) -> Self {
        let phone = payload.phone.trim();
        Self {
            name: payload.name.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_accept_both_cases() {
        let upper: Role = serde_json::from_str("\"PROVIDER\"").unwrap();
        let lower: Role = serde_json::from_str("\"provider\"").unwrap();
        assert_eq!(upper, Role::Provider);
        assert_eq!(lower, Role::Provider);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
    }

    #[test]
    fn register_rejects_admin_signup() {
        let payload = RegisterPayload {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "supersecret".into(),
            role: "ADMIN".into(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));

        let ok = RegisterPayload { role: "provider".into(), ..payload };
        assert!(ok.validate().is_ok());
        assert_eq!(ok.to_sign_up().role, Role::Provider);
    }

    #[test]
    fn profile_without_restaurant_has_no_provider_id() {
        let json = r#"{"id":"u1","name":"Bo","email":"bo@x.io","role":"PROVIDER","providerProfile":{"id":"","isOpen":true}}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.provider_id(), None);
    }
}
