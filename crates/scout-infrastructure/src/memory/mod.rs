//! In-memory adapters for local runs and tests
//!
//! All repositories created from one `MemoryStore` share its maps, so the
//! report listing can join the scout's name the same way the SQL adapter does.

pub mod repositories;
pub mod session_store;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use scout_core::domain::{Group, ScoutingReport, Session, User};

pub use repositories::{MemoryGroupRepository, MemoryReportRepository, MemoryUserRepository};
pub use session_store::MemorySessionStore;

#[derive(Default)]
pub struct MemoryStore {
    pub(crate) groups: RwLock<HashMap<Uuid, Group>>,
    pub(crate) users: RwLock<HashMap<Uuid, User>>,
    pub(crate) reports: RwLock<HashMap<Uuid, ScoutingReport>>,
    pub(crate) sessions: RwLock<HashMap<String, Session>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}
