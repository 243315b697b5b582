//! Domain services (business logic)

pub mod auth_service;
pub mod group_service;
pub mod report_service;

pub use auth_service::{AuthService, LoginResult, RegisterCommand, UserInfo};
pub use group_service::GroupService;
pub use report_service::ReportService;
