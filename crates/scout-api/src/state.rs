use std::path::PathBuf;
use std::sync::Arc;

use scout_core::services::{AuthService, GroupService, ReportService};
use scout_shared::config::AppConfig;
use scout_shared::AppError;

use crate::session_cookie::SessionCookies;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub reports: Arc<ReportService>,
    pub groups: Arc<GroupService>,
    pub cookies: SessionCookies,
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        auth: Arc<AuthService>,
        reports: Arc<ReportService>,
        groups: Arc<GroupService>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            auth,
            reports,
            groups,
            cookies: SessionCookies::new(&config.session)?,
            upload_dir: PathBuf::from(&config.storage.upload_dir),
            static_dir: PathBuf::from(&config.storage.static_dir),
        })
    }
}
