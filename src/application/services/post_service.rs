use crate::application::ports::media_store::MediaStore;
use crate::application::ports::repositories::{PostRepository, TopicRepository};
use crate::domain::entities::{Post, Topic, User};
use crate::shared::config::MediaConfig;
use crate::shared::AppError;
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

pub const MAX_CONTENT_LEN: usize = 5000;

/// 投稿の作成・削除・リアクションのオーケストレーション
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    topics: Arc<dyn TopicRepository>,
    media: Arc<dyn MediaStore>,
    media_config: MediaConfig,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        topics: Arc<dyn TopicRepository>,
        media: Arc<dyn MediaStore>,
        media_config: MediaConfig,
    ) -> Self {
        Self {
            posts,
            topics,
            media,
            media_config,
        }
    }

    pub async fn create_post(
        &self,
        author: &User,
        topic_name: &str,
        content: &str,
        image: Option<(Bytes, String)>,
    ) -> Result<Post, AppError> {
        // 入力検証
        if content.trim().is_empty() {
            return Err(AppError::InvalidInput("投稿内容が空です".to_string()));
        }
        if content.len() > MAX_CONTENT_LEN {
            return Err(AppError::InvalidInput(format!(
                "投稿内容が長すぎます（最大{MAX_CONTENT_LEN}文字）"
            )));
        }
        if topic_name.trim().is_empty() {
            return Err(AppError::InvalidInput("トピック名が必要です".to_string()));
        }

        let topic = Topic::new(topic_name);
        let mut post = Post::new(content.to_string(), topic.id.clone(), author);

        if let Some((data, content_type)) = image {
            if data.len() as u64 > self.media_config.max_upload_bytes {
                return Err(AppError::InvalidInput(format!(
                    "画像が大きすぎます（最大{}バイト）",
                    self.media_config.max_upload_bytes
                )));
            }
            let path = format!("posts/{}/{}", post.id, uuid::Uuid::new_v4());
            let url = self.media.upload(&path, data, &content_type).await?;
            post.image_url = Some(url);
        }

        self.posts.create_post(&post).await?;

        // トピックが未登録なら作ってから投稿を記録する
        if self.topics.get_topic(&topic.id).await?.is_none() {
            self.topics.upsert_topic(&topic).await?;
        }
        self.topics
            .record_post(&topic.id, post.created_at.timestamp_millis())
            .await?;

        debug!(post_id = %post.id, topic_id = %topic.id, "post created");
        Ok(post)
    }

    /// 作成者本人だけが削除できる
    pub async fn delete_post(&self, post_id: &str, requester_id: &str) -> Result<(), AppError> {
        let post = self
            .posts
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))?;
        if post.author_id != requester_id {
            return Err(AppError::Unauthorized(
                "自分の投稿だけ削除できます".to_string(),
            ));
        }
        self.posts.delete_post(post_id).await
    }

    pub async fn toggle_like(&self, post_id: &str, user_id: &str) -> Result<Post, AppError> {
        let post = self
            .posts
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))?;
        self.posts
            .set_like(post_id, user_id, !post.is_liked_by(user_id))
            .await
    }

    pub async fn toggle_bookmark(&self, post_id: &str, user_id: &str) -> Result<Post, AppError> {
        let post = self
            .posts
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))?;
        self.posts
            .set_bookmark(post_id, user_id, !post.is_bookmarked_by(user_id))
            .await
    }
}
