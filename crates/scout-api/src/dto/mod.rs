//! Request and response payloads

pub mod auth;
pub mod group;
pub mod report;

pub use auth::{AuthResponse, LoginRequest, MeResponse, RegisterRequest};
pub use group::GroupResponse;
pub use report::{CreatedReportResponse, SprayChartResponse};
