//! Demo data provisioning
//!
//! Idempotent: existing groups and users are left untouched.

use scout_core::error::DomainError;
use scout_core::services::{AuthService, GroupService};
use scout_shared::utils::mask_email;
use tracing::info;

/// Demo groups as `(name, description, registration code)`.
pub const DEMO_GROUPS: &[(&str, &str, &str)] = &[
    ("Demo Team", "Demo team for trying out the app", "DEMO2025"),
    ("Rampage 12U Baseball", "Rampage 12U travel baseball", "RAMPAGE2025"),
    ("Venom 11U Baseball", "Venom 11U travel baseball", "VENOM2025"),
];

pub const DEMO_ADMIN_EMAIL: &str = "admin@demo.com";

pub async fn seed_demo_data(
    groups: &GroupService,
    auth: &AuthService,
    admin_password: &str,
) -> Result<(), DomainError> {
    let mut demo_team = None;
    for (name, description, code) in DEMO_GROUPS {
        let group = groups.ensure_group(name, Some(description), code).await?;
        if demo_team.is_none() {
            demo_team = Some(group);
        }
    }

    let Some(demo_team) = demo_team else {
        return Ok(());
    };
    let admin = auth
        .ensure_user(&demo_team, DEMO_ADMIN_EMAIL, admin_password, "Demo", "Admin")
        .await?;

    info!(
        "Demo data ready: {} group(s), admin {}",
        DEMO_GROUPS.len(),
        mask_email(&admin.email)
    );
    Ok(())
}
