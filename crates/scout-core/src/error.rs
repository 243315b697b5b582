//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Unknown email, inactive account and wrong password all map here.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Email already registered")]
    EmailAlreadyExists(String),

    /// Malformed group id, unknown group and wrong code all map here.
    #[error("Invalid registration code for this team")]
    InvalidRegistrationCode,

    #[error("Group name already exists: {0}")]
    GroupNameAlreadyExists(String),

    #[error("Registration code already in use")]
    RegistrationCodeAlreadyExists,

    /// Missing or belonging to another group; the two are not distinguished.
    #[error("Report not found")]
    ReportNotFound,

    #[error("No spray chart image found")]
    SprayChartNotFound,

    #[error("No file uploaded")]
    NoFileUploaded,

    #[error("File too large (limit {limit} bytes)")]
    FileTooLarge { limit: usize },

    #[error("Only image files are allowed (got {0})")]
    UnsupportedMediaType(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        DomainError::ValidationError(message)
    }
}
