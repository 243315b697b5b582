// ============================================================================
// Scout Core - Report Form Fields
// File: crates/scout-core/src/domain/report_fields.rs
// Description: The fixed scouting form schema shared by requests and storage
// ============================================================================
//! The scouting form is a flat list of nullable text values. The list below is
//! the only place field names are spelled out: the struct, the ordered
//! `REPORT_FIELDS` column list and the accessors used by storage adapters are
//! all generated from it.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

macro_rules! report_fields {
    ($($field:ident),+ $(,)?) => {
        /// Values of the scouting form. Absent, `null` and empty-string inputs
        /// are all held as `None` so they persist as null.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct ReportFields {
            $(
                #[serde(default, deserialize_with = "form_value")]
                pub $field: Option<String>,
            )+
        }

        /// Form field names in storage column order.
        pub const REPORT_FIELDS: &[&str] = &[$(stringify!($field)),+];

        impl ReportFields {
            #[cfg(test)]
            fn get(&self, name: &str) -> Option<&str> {
                match name {
                    $(stringify!($field) => self.$field.as_deref(),)+
                    _ => None,
                }
            }

            /// Returns `false` when the name is not a form field.
            #[cfg(test)]
            fn set(&mut self, name: &str, value: Option<String>) -> bool {
                match name {
                    $(stringify!($field) => { self.$field = normalize(value); true })+
                    _ => false,
                }
            }

            /// `(name, value)` pairs in `REPORT_FIELDS` order.
            pub fn values(&self) -> Vec<(&'static str, Option<&str>)> {
                vec![$((stringify!($field), self.$field.as_deref())),+]
            }

            /// Build from a per-column reader, e.g. a database row.
            pub fn try_from_columns<E>(
                mut column: impl FnMut(&'static str) -> Result<Option<String>, E>,
            ) -> Result<Self, E> {
                Ok(Self {
                    $($field: normalize(column(stringify!($field))?),)+
                })
            }

            /// Number of populated fields.
            pub fn filled(&self) -> usize {
                0 $(+ usize::from(self.$field.is_some()))+
            }
        }
    };
}

report_fields! {
    scout_name, scout_date, event, league_organization,
    player_name, primary_position, jersey_number, date_of_birth,
    age, height, weight, bats, throws, team, parent_guardian,
    contact, build, coordination, athleticism, motor_skills,
    growth_projection, stance_setup, swing_mechanics, contact_ability,
    power_potential, plate_discipline, bat_speed, approach, bunting,
    speed, base_running_iq, stealing_ability, first_step, turns,
    fielding_readiness, glove_work, footwork, arm_strength,
    arm_accuracy, range_field, game_awareness, positions_played,
    fastball_mph, control_pitching, breaking_ball, changeup,
    delivery, mound_presence, strikes, game_understanding,
    coachability, effort_level, competitiveness, teamwork,
    focus_attention, leadership, biggest_strengths, improvement_areas,
    recommended_focus, current_level, development_potential,
    recommended_next_steps, playing_time_recommendation, position_projection,
    additional_training, work_at_home, positive_reinforcement,
    notes_observations, next_evaluation_date, followup_items,
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Accept any JSON scalar; numbers and booleans keep their JSON text form.
fn form_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(normalize(Some(s))),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a text or number value, got {}",
            match other {
                Value::Array(_) => "an array",
                _ => "an object",
            }
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_list_is_complete_and_unique() {
        assert_eq!(REPORT_FIELDS.len(), 70);
        let mut names = REPORT_FIELDS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), REPORT_FIELDS.len());
        assert!(!REPORT_FIELDS.contains(&"spray_chart_image"));
        assert_eq!(REPORT_FIELDS[0], "scout_name");
        assert_eq!(REPORT_FIELDS[69], "followup_items");
    }

    #[test]
    fn test_omitted_fields_are_null_not_absent() {
        let fields: ReportFields = serde_json::from_value(json!({})).unwrap();
        assert_eq!(fields.filled(), 0);

        let out = serde_json::to_value(&fields).unwrap();
        let object = out.as_object().unwrap();
        assert_eq!(object.len(), REPORT_FIELDS.len());
        for name in REPORT_FIELDS {
            assert_eq!(object.get(*name), Some(&Value::Null), "{name}");
        }
    }

    #[test]
    fn test_empty_strings_become_null() {
        let fields: ReportFields = serde_json::from_value(json!({
            "player_name": "Sam Ortiz",
            "team": "",
            "bats": null,
        }))
        .unwrap();
        assert_eq!(fields.player_name.as_deref(), Some("Sam Ortiz"));
        assert_eq!(fields.team, None);
        assert_eq!(fields.bats, None);
        assert_eq!(fields.filled(), 1);
    }

    #[test]
    fn test_scalars_are_kept_as_text() {
        let fields: ReportFields = serde_json::from_value(json!({
            "age": 11,
            "fastball_mph": 52.5,
            "jersey_number": "07",
            "coachability": true,
        }))
        .unwrap();
        assert_eq!(fields.age.as_deref(), Some("11"));
        assert_eq!(fields.fastball_mph.as_deref(), Some("52.5"));
        assert_eq!(fields.jersey_number.as_deref(), Some("07"));
        assert_eq!(fields.coachability.as_deref(), Some("true"));
    }

    #[test]
    fn test_unknown_keys_ignored_and_nested_rejected() {
        let fields: ReportFields = serde_json::from_value(json!({
            "id": "abc",
            "spray_chart_image": "spray-chart-1.png",
            "player_name": "Sam",
        }))
        .unwrap();
        assert_eq!(fields.filled(), 1);

        let nested = serde_json::from_value::<ReportFields>(json!({ "team": ["a"] }));
        assert!(nested.is_err());
    }

    #[test]
    fn test_get_set_and_values_follow_field_order() {
        let mut fields = ReportFields::default();
        assert!(fields.set("player_name", Some("Sam".into())));
        assert!(fields.set("team", Some(String::new())));
        assert!(!fields.set("spray_chart_image", Some("x.png".into())));
        assert_eq!(fields.get("player_name"), Some("Sam"));
        assert_eq!(fields.get("team"), None);

        let values = fields.values();
        let names: Vec<&str> = values.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, REPORT_FIELDS);
        assert_eq!(values[4], ("player_name", Some("Sam")));
    }

    #[test]
    fn test_try_from_columns() {
        let fields = ReportFields::try_from_columns::<()>(|name| {
            Ok(match name {
                "player_name" => Some("Sam".to_string()),
                "team" => Some(String::new()),
                _ => None,
            })
        })
        .unwrap();
        assert_eq!(fields.player_name.as_deref(), Some("Sam"));
        assert_eq!(fields.team, None);
    }
}
