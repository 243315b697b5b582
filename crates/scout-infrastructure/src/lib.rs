//! # Scout Infrastructure
//! 
//! Storage implementations (adapters): PostgreSQL, Redis, in-memory and
//! filesystem, plus migrations and demo seeding.

pub mod database;
pub mod cache;
pub mod memory;
pub mod storage;
pub mod seed;

pub use database::{
    create_pool, run_migrations, PgGroupRepository, PgReportRepository, PgSessionRepository,
    PgUserRepository,
};
pub use cache::{create_redis_pool, RedisSessionStore};
pub use memory::{
    MemoryGroupRepository, MemoryReportRepository, MemorySessionStore, MemoryStore,
    MemoryUserRepository,
};
pub use storage::FilesystemAttachmentStore;
pub use seed::seed_demo_data;
