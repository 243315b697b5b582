//! Redis-backed adapters

pub mod redis_session_store;

pub use redis_session_store::{create_redis_pool, RedisSessionStore};
