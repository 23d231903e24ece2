// モジュール定義
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod shared;
pub mod state;

pub use application::feed::{
    FeedReconciler, FeedTuning, LoadMoreTrigger, PaginationState, PostsState, Response,
};
pub use application::ports::{
    AuthGateway, AuthUser, BackendError, DocumentStore, MediaStore, PostRepository,
    TopicRepository, UserRepository,
};
pub use application::services::{
    FeedScope, PostService, PostsFeedService, SessionService, TrendingService, TrendingState,
    UserService,
};
pub use domain::entities::{Post, Topic, User};
pub use shared::{AppConfig, AppError, Result};
pub use state::AppState;

/// ログ設定の初期化。シェル側が起動時に一度呼ぶ。
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saezuri_core=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
