// ============================================================================
// Scout Core - Scouting Report Entity
// File: crates/scout-core/src/domain/report.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::report_fields::ReportFields;
use super::session::Session;

/// A persisted scouting report. Serializes flat: the form fields sit beside
/// the ids and timestamps, nulls included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutingReport {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub group_id: Option<Uuid>,

    #[serde(flatten)]
    pub fields: ReportFields,

    pub spray_chart_image: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScoutingReport {
    /// New report owned by the session's user and scoped to its group.
    pub fn new(owner: &Session, fields: ReportFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: Some(owner.user_id),
            group_id: Some(owner.group_id),
            fields,
            spray_chart_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn replace_fields(&mut self, fields: ReportFields) {
        self.fields = fields;
        self.updated_at = Utc::now();
    }

    pub fn summary(&self, first_name: Option<String>, last_name: Option<String>) -> ReportSummary {
        ReportSummary {
            id: self.id,
            player_name: self.fields.player_name.clone(),
            primary_position: self.fields.primary_position.clone(),
            team: self.fields.team.clone(),
            scout_date: self.fields.scout_date.clone(),
            created_at: self.created_at,
            first_name,
            last_name,
        }
    }
}

/// List projection: player identity plus the scout who filed the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub id: Uuid,
    pub player_name: Option<String>,
    pub primary_position: Option<String>,
    pub team: Option<String>,
    pub scout_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::REPORT_FIELDS;

    fn session() -> Session {
        Session::new(
            "sid".to_string(),
            Uuid::new_v4(),
            "coach@team.org".to_string(),
            Uuid::new_v4(),
            "Demo Team".to_string(),
            3600,
        )
    }

    #[test]
    fn test_new_report_takes_owner_and_group() {
        let owner = session();
        let report = ScoutingReport::new(&owner, ReportFields::default());
        assert_eq!(report.user_id, Some(owner.user_id));
        assert_eq!(report.group_id, Some(owner.group_id));
        assert!(report.spray_chart_image.is_none());
    }

    #[test]
    fn test_serializes_flat_with_nulls() {
        let report = ScoutingReport::new(&session(), ReportFields::default());
        let json = serde_json::to_value(&report).unwrap();
        let object = json.as_object().unwrap();
        for name in REPORT_FIELDS {
            assert!(object.get(*name).unwrap().is_null());
        }
        assert!(object.get("spray_chart_image").unwrap().is_null());
        assert!(object.contains_key("id"));
        assert!(!object.contains_key("fields"));
    }
}
