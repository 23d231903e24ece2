pub mod feed_service;
pub mod post_service;
pub mod session_service;
pub mod trending_service;
pub mod user_service;

pub use feed_service::{FeedScope, PostsFeedService};
pub use post_service::PostService;
pub use session_service::SessionService;
pub use trending_service::{TrendingService, TrendingState};
pub use user_service::{UpdateProfileInput, UserService};
