//! Auth payloads (camelCase on the wire)

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use scout_core::services::{RegisterCommand, UserInfo};
use scout_shared::constants::MIN_PASSWORD_LENGTH;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn check(&self) -> Result<(), ApiError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ApiError::validation("Email and password are required"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub registration_code: String,
}

impl RegisterRequest {
    /// Presence first, then format rules.
    pub fn check(&self) -> Result<(), ApiError> {
        let required = [
            self.email.trim(),
            self.password.as_str(),
            self.first_name.trim(),
            self.last_name.trim(),
            self.group_id.trim(),
            self.registration_code.as_str(),
        ];
        if required.iter().any(|value| value.is_empty()) {
            return Err(ApiError::validation(
                "All fields including registration code are required",
            ));
        }
        self.validate()
            .map_err(|e| ApiError::from(scout_core::DomainError::from(e)))
    }

    pub fn into_command(self) -> RegisterCommand {
        RegisterCommand {
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            group_id: self.group_id,
            registration_code: self.registration_code,
        }
    }
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|value| value.trim().to_string())
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn register(body: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_register_requires_every_field() {
        let req = register(json!({
            "email": "a@b.org", "password": "secret1", "firstName": "A",
            "lastName": "B", "groupId": "x"
        }));
        let err = req.check().unwrap_err();
        assert!(err.to_string().contains("registration code are required"));
    }

    #[test]
    fn test_register_password_and_email_rules() {
        let short = register(json!({
            "email": "a@b.org", "password": "12345", "firstName": "A",
            "lastName": "B", "groupId": "x", "registrationCode": "C"
        }));
        assert!(short.check().unwrap_err().to_string().contains("at least 6"));

        let bad_email = register(json!({
            "email": "not-an-email", "password": "123456", "firstName": "A",
            "lastName": "B", "groupId": "x", "registrationCode": "C"
        }));
        assert!(bad_email.check().unwrap_err().to_string().contains("Invalid email"));
    }

    #[test]
    fn test_register_accepts_padded_email() {
        let req = register(json!({
            "email": "  coach@team.org ", "password": "secret1", "firstName": "Pat",
            "lastName": "Lee", "groupId": "x", "registrationCode": "C"
        }));
        assert!(req.check().is_ok());
        assert_eq!(req.into_command().email, "coach@team.org");
    }

    #[test]
    fn test_login_requires_both() {
        let req: LoginRequest = serde_json::from_value(json!({"email": "a@b.org"})).unwrap();
        assert!(req.check().is_err());
    }
}
