pub mod base;
pub mod file_storage;
pub mod memory_storage;

pub use base::*;
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
