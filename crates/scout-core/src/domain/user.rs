//! User domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,
    pub group_id: Uuid,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,

    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        group_id: Uuid,
        email: &str,
        password_hash: String,
        first_name: &str,
        last_name: &str,
    ) -> Result<Self, validator::ValidationErrors> {
        let now = Utc::now();
        let user = Self {
            id: Uuid::new_v4(),
            group_id,
            email: scout_shared::utils::normalize_email(email),
            password_hash,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        user.validate()?;
        Ok(user)
    }

    pub fn can_login(&self) -> bool {
        self.is_active
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_active_and_lowercased() {
        let user = User::new(Uuid::new_v4(), " Coach@Team.org", "hash".into(), "Pat", "Lee").unwrap();
        assert_eq!(user.email, "coach@team.org");
        assert!(user.can_login());
        assert_eq!(user.full_name(), "Pat Lee");
    }

    #[test]
    fn test_deactivate() {
        let mut user = User::new(Uuid::new_v4(), "a@b.co", "hash".into(), "A", "B").unwrap();
        user.deactivate();
        assert!(!user.can_login());
    }

    #[test]
    fn test_invalid_email_rejected() {
        assert!(User::new(Uuid::new_v4(), "nope", "hash".into(), "A", "B").is_err());
    }
}
