// ============================================================================
// Scout Core - Authentication Service
// File: crates/scout-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service: login, registration, session lifecycle

use std::sync::Arc;
use serde::Serialize;
use uuid::Uuid;
use tracing::{info, warn, error};

use scout_security::password::PasswordService;
use scout_security::session::generate_session_id;
use scout_shared::utils::{mask_email, normalize_email};

use crate::domain::{Group, Session, User};
use crate::error::DomainError;
use crate::repositories::{GroupRepository, SessionRepository, UserRepository};

/// Registration input, already checked for presence by the caller.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub group_id: String,
    pub registration_code: String,
}

/// Authentication service for handling login/register flows
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    group_repo: Arc<dyn GroupRepository>,
    session_repo: Arc<dyn SessionRepository>,
    session_ttl_seconds: i64,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        group_repo: Arc<dyn GroupRepository>,
        session_repo: Arc<dyn SessionRepository>,
        session_ttl_seconds: i64,
    ) -> Self {
        Self {
            user_repo,
            group_repo,
            session_repo,
            session_ttl_seconds,
        }
    }

    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    /// Login with email and password, opening a new session
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginResult, DomainError> {
        let email = normalize_email(email);
        info!("Login attempt for email: {}", mask_email(&email));

        // 1. Find user by email; inactive accounts look exactly like missing ones
        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) if user.can_login() => user,
            Some(_) => {
                warn!("Login failed: inactive account: {}", mask_email(&email));
                return Err(DomainError::InvalidCredentials);
            }
            None => {
                warn!("Login failed: email not found: {}", mask_email(&email));
                return Err(DomainError::InvalidCredentials);
            }
        };

        // 2. Verify password
        let password_valid = PasswordService::verify(password, &user.password_hash)
            .map_err(|e| {
                error!("Stored password hash unreadable for user {}: {}", user.id, e);
                DomainError::InvalidCredentials
            })?;

        if !password_valid {
            warn!("Login failed: invalid password for: {}", mask_email(&email));
            return Err(DomainError::InvalidCredentials);
        }

        let user = if PasswordService::needs_rehash(&user.password_hash) {
            self.upgrade_password_hash(user, password).await
        } else {
            user
        };

        // 3. Resolve group and open session
        let group = self.group_repo.find_by_id(&user.group_id).await?
            .ok_or_else(|| DomainError::InternalError(format!("group {} of user {} missing", user.group_id, user.id)))?;

        let session = Session::new(
            generate_session_id(),
            user.id,
            user.email.clone(),
            group.id,
            group.name.clone(),
            self.session_ttl_seconds,
        );
        self.session_repo.create(&session).await?;

        info!("Login successful for: {}", mask_email(&email));

        Ok(LoginResult {
            user: UserInfo::new(&user, &group),
            session,
        })
    }

    /// Replace a legacy bcrypt hash with an Argon2 one. Failures are logged
    /// and the login proceeds with the old hash.
    async fn upgrade_password_hash(&self, mut user: User, password: &str) -> User {
        let hash = match PasswordService::hash(password) {
            Ok(hash) => hash,
            Err(e) => {
                warn!("Rehash of legacy password for user {} failed: {}", user.id, e);
                return user;
            }
        };
        let previous = std::mem::replace(&mut user.password_hash, hash);
        user.updated_at = chrono::Utc::now();
        match self.user_repo.update(&user).await {
            Ok(updated) => {
                info!("Upgraded legacy password hash for user {}", user.id);
                updated
            }
            Err(e) => {
                warn!("Storing upgraded hash for user {} failed: {}", user.id, e);
                user.password_hash = previous;
                user
            }
        }
    }

    /// Register a new user into an existing group
    pub async fn register(&self, command: RegisterCommand) -> Result<UserInfo, DomainError> {
        let email = normalize_email(&command.email);
        info!("Registration attempt for email: {}", mask_email(&email));

        // 1. Check if email already exists
        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", mask_email(&email));
            return Err(DomainError::EmailAlreadyExists(email));
        }

        // 2. Resolve group and check its code; every failure is the same error
        let group = self.verify_registration_code(&command.group_id, &command.registration_code).await?;

        // 3. Hash password
        let password_hash = PasswordService::hash(&command.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        // 4. Create user entity and save
        let user = User::new(
            group.id,
            &email,
            password_hash,
            &command.first_name,
            &command.last_name,
        )?;
        let created = self.user_repo.create(&user).await?;

        info!("Registration successful for: {} (group {})", mask_email(&email), group.name);
        Ok(UserInfo::new(&created, &group))
    }

    async fn verify_registration_code(&self, group_id: &str, code: &str) -> Result<Group, DomainError> {
        let Some(group_id) = scout_shared::parse_id(group_id) else {
            warn!("Registration failed: malformed group id");
            return Err(DomainError::InvalidRegistrationCode);
        };

        match self.group_repo.find_by_id(&group_id).await? {
            Some(group) if group.accepts_code(code) => Ok(group),
            _ => {
                warn!("Registration failed: invalid code for group {}", group_id);
                Err(DomainError::InvalidRegistrationCode)
            }
        }
    }

    /// Live session for an id, or `None`. Expired sessions are removed.
    pub async fn resolve_session(&self, session_id: &str) -> Result<Option<Session>, DomainError> {
        let Some(session) = self.session_repo.find(session_id).await? else {
            return Ok(None);
        };
        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Profile of the session's user. A session whose user vanished or was
    /// deactivated is destroyed.
    pub async fn current_user(&self, session: &Session) -> Result<UserInfo, DomainError> {
        let user = match self.user_repo.find_by_id(&session.user_id).await? {
            Some(user) if user.can_login() => user,
            _ => {
                warn!("Session {} refers to a missing or inactive user", session.user_id);
                self.session_repo.delete(&session.id).await?;
                return Err(DomainError::Unauthenticated);
            }
        };

        let group = self.group_repo.find_by_id(&user.group_id).await?
            .ok_or(DomainError::Unauthenticated)?;
        Ok(UserInfo::new(&user, &group))
    }

    pub async fn logout(&self, session_id: &str) -> Result<(), DomainError> {
        self.session_repo.delete(session_id).await
    }

    /// Deactivate an account and close its sessions. Deactivated users can
    /// no longer log in.
    pub async fn deactivate_user(&self, user_id: &Uuid) -> Result<(), DomainError> {
        let mut user = self.user_repo.find_by_id(user_id).await?
            .ok_or_else(|| DomainError::ValidationError(format!("unknown user {}", user_id)))?;
        user.deactivate();
        self.user_repo.update(&user).await?;
        let closed = self.session_repo.delete_for_user(user_id).await?;
        info!("Deactivated user {} and closed {} session(s)", user_id, closed);
        Ok(())
    }

    /// Create the user unless the email is already taken. Used for seeding.
    pub async fn ensure_user(
        &self,
        group: &Group,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, DomainError> {
        if let Some(existing) = self.user_repo.find_by_email(email).await? {
            return Ok(existing);
        }
        let password_hash = PasswordService::hash(password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        let user = User::new(group.id, email, password_hash, first_name, last_name)?;
        self.user_repo.create(&user).await
    }
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserInfo,
    pub session: Session,
}

/// User info returned in auth responses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub group_id: Uuid,
    pub group_name: String,
}

impl UserInfo {
    pub fn new(user: &User, group: &Group) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            group_id: group.id,
            group_name: group.name.clone(),
        }
    }
}
