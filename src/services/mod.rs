// Service exports
pub mod appwrite;
pub mod postgres;
pub mod store;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use postgres::{PostgresClient, PostgresError};
pub use store::{ProfileStore, StoreError, MemoryStore, dedupe_by_id};
