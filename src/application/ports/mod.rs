pub mod auth_gateway;
pub mod document_store;
pub mod media_store;
pub mod repositories;

pub use auth_gateway::{AuthGateway, AuthUser};
pub use document_store::{
    BackendError, Direction, Document, DocumentStore, FieldOp, Filter, Query,
};
pub use media_store::MediaStore;
pub use repositories::{PostRepository, ProfileUpdate, TopicRepository, UserRepository};
