//! # Scout Security
//! 
//! Security utilities: password hashing, session ids, signed session cookies.

pub mod password;
pub mod session;

pub use password::{PasswordError, PasswordService};
pub use session::{generate_session_id, CookieSigner};
