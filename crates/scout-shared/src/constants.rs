//! Application-wide constants

pub const DEFAULT_SESSION_COOKIE: &str = "scout.sid";
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 86_400;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const MIN_PASSWORD_LENGTH: u64 = 6;
pub const UPLOADS_ROUTE: &str = "/uploads";
pub const SPRAY_CHART_FIELD: &str = "sprayChart";
pub const SPRAY_CHART_PREFIX: &str = "spray-chart-";
