pub mod feed_handler;
pub mod post_handler;
pub mod session_handler;
pub mod topic_handler;
pub mod user_handler;

pub use feed_handler::FeedHandler;
pub use post_handler::PostHandler;
pub use session_handler::SessionHandler;
pub use topic_handler::TopicHandler;
pub use user_handler::UserHandler;
