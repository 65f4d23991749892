pub mod app_config;
pub mod json_repo;
pub mod kv;

pub use app_config::Config;
pub use json_repo::JsonRepository;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
