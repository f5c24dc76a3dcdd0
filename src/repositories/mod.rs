pub mod key_value_store;
pub mod record_repository;

pub use key_value_store::{FileStore, KeyValueStore, MemoryStore};
pub use record_repository::{IdentityRepository, RecordRepository, SessionRepository};
