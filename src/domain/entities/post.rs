use super::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// バックエンドのドキュメントをそのまま写したフラットなDTO。
/// 作成者情報は投稿時点のコピーで、あとから書き戻されることはない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub topic_id: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub like_count: u32,
    pub liked_by: Vec<String>,
    pub bookmarked_by: Vec<String>,
}

impl Post {
    pub fn new(content: String, topic_id: String, author: &User) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            author_avatar_url: author.avatar_url.clone(),
            topic_id,
            content,
            image_url: None,
            created_at: chrono::Utc::now(),
            like_count: 0,
            liked_by: Vec::new(),
            bookmarked_by: Vec::new(),
        }
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }

    pub fn is_bookmarked_by(&self, user_id: &str) -> bool {
        self.bookmarked_by.iter().any(|id| id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> User {
        User::new(
            "uid-1".to_string(),
            "Alice".to_string(),
            "alice@example.com".to_string(),
        )
    }

    #[test]
    fn new_post_copies_author_fields() {
        let mut user = author();
        user.avatar_url = Some("https://example.com/a.png".to_string());
        let post = Post::new("hello".to_string(), "rust".to_string(), &user);

        assert_eq!(post.author_id, "uid-1");
        assert_eq!(post.author_name, "Alice");
        assert_eq!(post.author_avatar_url.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(post.like_count, 0);
        assert!(post.liked_by.is_empty());
    }

    #[test]
    fn like_and_bookmark_membership() {
        let mut post = Post::new("hello".to_string(), "rust".to_string(), &author());
        post.liked_by.push("uid-2".to_string());
        post.bookmarked_by.push("uid-3".to_string());

        assert!(post.is_liked_by("uid-2"));
        assert!(!post.is_liked_by("uid-1"));
        assert!(post.is_bookmarked_by("uid-3"));
        assert!(!post.is_bookmarked_by("uid-2"));
    }
}
