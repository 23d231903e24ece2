use crate::application::feed::Response;
use crate::domain::entities::{Post, Topic, User};
use crate::shared::AppError;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// フィード系メソッドはリクエストごとに1本のストリームを返す。
/// 各ストリームは必ずLoadingから始まり、以降はバックエンドのエミッション
/// ごとにSuccess/Failureを流す。追加ロードはより大きなlimitで再購読する。
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn observe_recent(&self, limit: usize) -> mpsc::Receiver<Response<Vec<Post>>>;

    async fn observe_bookmarked(
        &self,
        user_id: &str,
        limit: usize,
    ) -> mpsc::Receiver<Response<Vec<Post>>>;

    async fn observe_by_topic(
        &self,
        topic_id: &str,
        limit: usize,
    ) -> mpsc::Receiver<Response<Vec<Post>>>;

    async fn observe_by_author(
        &self,
        author_id: &str,
        limit: usize,
    ) -> mpsc::Receiver<Response<Vec<Post>>>;

    async fn create_post(&self, post: &Post) -> Result<(), AppError>;

    async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError>;

    async fn delete_post(&self, id: &str) -> Result<(), AppError>;

    async fn set_like(&self, post_id: &str, user_id: &str, liked: bool) -> Result<Post, AppError>;

    async fn set_bookmark(
        &self,
        post_id: &str,
        user_id: &str,
        bookmarked: bool,
    ) -> Result<Post, AppError>;
}

#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// post_count降順+limitで絞った購読。並び替えはエミッションごとに
    /// クライアント側でも適用する。全件再フェッチはしない。
    async fn observe_trending(&self, limit: usize) -> mpsc::Receiver<Response<Vec<Topic>>>;

    async fn search_topics(&self, prefix: &str, limit: usize) -> Result<Vec<Topic>, AppError>;

    async fn get_topic(&self, id: &str) -> Result<Option<Topic>, AppError>;

    async fn upsert_topic(&self, topic: &Topic) -> Result<(), AppError>;

    /// 投稿があったことを記録する。post_countを+1し、last_posted_atを更新。
    async fn record_post(&self, topic_id: &str, at: i64) -> Result<Topic, AppError>;
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn upsert_user(&self, user: &User) -> Result<(), AppError>;

    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<User, AppError>;
}
