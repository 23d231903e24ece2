pub mod post;
pub mod topic;
pub mod user;

pub use post::Post;
pub use topic::Topic;
pub use user::User;
