use super::Validate;
use crate::application::feed::{PaginationState, PostsState};
use crate::domain::entities::Post;
use serde::{Deserialize, Serialize};

// レスポンスDTO
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub topic_id: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: i64,
    pub like_count: u32,
    pub is_liked: bool,
    pub is_bookmarked: bool,
}

impl PostResponse {
    /// viewerから見たフラグを焼き込んで返す
    pub fn from_post(post: &Post, viewer: Option<&str>) -> Self {
        Self {
            id: post.id.clone(),
            author_id: post.author_id.clone(),
            author_name: post.author_name.clone(),
            author_avatar_url: post.author_avatar_url.clone(),
            topic_id: post.topic_id.clone(),
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            created_at: post.created_at.timestamp_millis(),
            like_count: post.like_count,
            is_liked: viewer.is_some_and(|uid| post.is_liked_by(uid)),
            is_bookmarked: viewer.is_some_and(|uid| post.is_bookmarked_by(uid)),
        }
    }
}

/// フィード画面が描画に使う状態スナップショット
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FeedStateResponse {
    pub posts: Vec<PostResponse>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub end_reached: bool,
}

impl FeedStateResponse {
    pub fn from_state(
        state: &PostsState,
        pagination: PaginationState,
        viewer: Option<&str>,
    ) -> Self {
        Self {
            posts: state
                .posts
                .iter()
                .map(|post| PostResponse::from_post(post, viewer))
                .collect(),
            is_loading: state.is_loading,
            error: state.error.clone(),
            end_reached: pagination.end_reached,
        }
    }
}

// リクエストDTO
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub topic_name: String,
    pub content: String,
}

impl Validate for CreatePostRequest {
    fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("投稿内容が空です".to_string());
        }
        if self.topic_name.trim().is_empty() {
            return Err("トピック名が必要です".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostActionRequest {
    pub post_id: String,
    pub user_id: String,
}

impl Validate for PostActionRequest {
    fn validate(&self) -> Result<(), String> {
        if self.post_id.trim().is_empty() {
            return Err("投稿IDが必要です".to_string());
        }
        if self.user_id.trim().is_empty() {
            return Err("ユーザーIDが必要です".to_string());
        }
        Ok(())
    }
}

/// スクロール位置の通知
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct ScrollEvent {
    pub last_visible_index: usize,
}
