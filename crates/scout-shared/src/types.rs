//! Common types

use uuid::Uuid;

pub type EntityId = Uuid;

pub fn new_id() -> EntityId {
    Uuid::new_v4()
}

/// Parse an identifier coming from a URL or request body.
pub fn parse_id(raw: &str) -> Option<EntityId> {
    Uuid::parse_str(raw.trim()).ok()
}
