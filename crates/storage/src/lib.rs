pub mod background;
pub mod error;
pub mod file;
pub mod memory;
pub mod snapshot;
pub mod store;

pub use background::BackgroundStorage;
pub use error::{Result, StorageError};
pub use file::FileStorage;
pub use memory::InMemoryStorage;
pub use snapshot::{SNAPSHOT_SCHEMA, Snapshot};
pub use store::KeyValueStore;
