use serde::Serialize;
use uuid::Uuid;

use scout_core::domain::Group;

/// Public view of a group; the registration code stays server-side.
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            description: group.description,
        }
    }
}
