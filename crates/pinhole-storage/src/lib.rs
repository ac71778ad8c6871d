pub mod memory;

pub use memory::InMemoryRepository;
pub use pinhole_core::{NewRecord, ReadRepository, Repository, StorageError, UrlRecord};
