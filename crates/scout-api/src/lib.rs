//! # Scout API
//! 
//! HTTP handlers, middleware, DTOs, and the router.

pub mod handlers;
pub mod middleware;
pub mod dto;
pub mod error;
pub mod response;
pub mod routes;
pub mod session_cookie;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use session_cookie::SessionCookies;
pub use state::AppState;
