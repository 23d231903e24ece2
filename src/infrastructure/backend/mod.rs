pub mod mapper;
pub mod memory_auth;
pub mod memory_media;
pub mod memory_store;
pub mod posts;
pub mod store_repository;
pub mod topics;
pub mod users;

pub use memory_auth::MemoryAuth;
pub use memory_media::MemoryMedia;
pub use memory_store::MemoryStore;
pub use store_repository::StoreRepository;
