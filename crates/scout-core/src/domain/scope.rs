//! Tenant scope applied to every report query

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The set of reports a caller may see: those of their own group plus
/// legacy reports that never had a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantScope {
    pub group_id: Uuid,
}

impl TenantScope {
    pub fn new(group_id: Uuid) -> Self {
        Self { group_id }
    }

    pub fn permits(&self, report_group: Option<Uuid>) -> bool {
        match report_group {
            Some(group_id) => group_id == self.group_id,
            None => true,
        }
    }
}
