// Saved company profiles, one list per letter type.

pub mod handlers;
pub mod repository;
pub mod session;
pub mod store;

pub use repository::CompanyRepository;
pub use session::CompanySession;
pub use store::{KeyValueStore, MemoryKeyValueStore, RedisKeyValueStore, StoreError};
