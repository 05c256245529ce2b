pub mod error;
pub mod memory;
pub mod post_repo;
pub mod user_repo;

pub use memory::MemoryDb;
