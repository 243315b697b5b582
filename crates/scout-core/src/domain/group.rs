// ============================================================================
// Scout Core - Group Entity
// File: crates/scout-core/src/domain/group.rs
// Description: Team (tenant) entity gated by a registration code
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Group (team) entity. Every user belongs to exactly one group and every
/// report is visible to the members of its group.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Group {
    pub id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Group name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,

    /// Shared secret required to join the group. Never serialized to clients.
    #[serde(skip_serializing)]
    #[validate(length(min = 4, max = 64, message = "Registration code must be between 4 and 64 characters"))]
    pub registration_code: String,

    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(
        name: String,
        description: Option<String>,
        registration_code: String,
    ) -> Result<Self, validator::ValidationErrors> {
        let group = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            description: description.map(|d| d.trim().to_string()),
            registration_code: registration_code.trim().to_string(),
            created_at: Utc::now(),
        };

        group.validate()?;
        Ok(group)
    }

    /// Exact, case-sensitive comparison against the stored code.
    pub fn accepts_code(&self, code: &str) -> bool {
        self.registration_code == code
    }
}
