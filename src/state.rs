use crate::application::feed::FeedTuning;
use crate::application::ports::{
    AuthGateway, DocumentStore, MediaStore, PostRepository, TopicRepository, UserRepository,
};
use crate::application::services::{
    FeedScope, PostService, PostsFeedService, SessionService, TrendingService, UserService,
};
use crate::infrastructure::backend::{MemoryAuth, MemoryMedia, MemoryStore, StoreRepository};
use crate::shared::AppConfig;
use std::sync::Arc;

/// アプリケーション全体の状態を管理する構造体。
/// バックエンドのポート3つを受け取り、リポジトリとサービスを配線する。
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub documents: Arc<dyn DocumentStore>,
    pub auth: Arc<dyn AuthGateway>,
    pub media: Arc<dyn MediaStore>,
    pub posts: Arc<dyn PostRepository>,
    pub topics: Arc<dyn TopicRepository>,
    pub users: Arc<dyn UserRepository>,
    pub post_service: Arc<PostService>,
    pub trending_service: Arc<TrendingService>,
    pub session_service: Arc<SessionService>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        documents: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthGateway>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        let repository = Arc::new(StoreRepository::new(Arc::clone(&documents)));
        let posts: Arc<dyn PostRepository> = Arc::clone(&repository) as Arc<dyn PostRepository>;
        let topics: Arc<dyn TopicRepository> = Arc::clone(&repository) as Arc<dyn TopicRepository>;
        let users: Arc<dyn UserRepository> = Arc::clone(&repository) as Arc<dyn UserRepository>;

        let post_service = Arc::new(PostService::new(
            Arc::clone(&posts),
            Arc::clone(&topics),
            Arc::clone(&media),
            config.media.clone(),
        ));
        let trending_service = Arc::new(TrendingService::new(
            Arc::clone(&topics),
            config.feed.initial_limit,
        ));
        let session_service = Arc::new(SessionService::new(
            Arc::clone(&auth),
            Arc::clone(&users),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::clone(&media),
            config.media.clone(),
        ));

        Self {
            config,
            documents,
            auth,
            media,
            posts,
            topics,
            users,
            post_service,
            trending_service,
            session_service,
            user_service,
        }
    }

    /// テストとデモ用。全ポートをインメモリ実装で配線する。
    pub fn with_memory_backend(config: AppConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryAuth::new()),
            Arc::new(MemoryMedia::new()),
        )
    }

    /// 画面1枚ぶんのフィードステートホルダーを開く
    pub fn open_feed(&self, scope: FeedScope) -> PostsFeedService {
        PostsFeedService::new(
            Arc::clone(&self.posts),
            scope,
            FeedTuning::from(&self.config.feed),
        )
    }
}
