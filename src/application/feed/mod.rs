pub mod reconciler;
pub mod response;
pub mod state;
pub mod trigger;

pub use reconciler::{FeedReconciler, DEFAULT_FEED_ERROR};
pub use response::Response;
pub use state::{FeedTuning, PaginationState, PostsState};
pub use trigger::LoadMoreTrigger;
