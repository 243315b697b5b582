//! # Scout Core - Domain Module
//! 
//! Domain entities for the scouting report application.

pub mod group;
pub mod user;
pub mod report;
pub mod report_fields;
pub mod scope;
pub mod session;
pub mod attachment;

// Re-export all entities
pub use group::Group;
pub use user::User;
pub use report::{ScoutingReport, ReportSummary};
pub use report_fields::{ReportFields, REPORT_FIELDS};
pub use scope::TenantScope;
pub use session::Session;
pub use attachment::ImageUpload;
