use crate::application::ports::document_store::{BackendError, Document};
use crate::domain::entities::{Post, Topic, User};
use chrono::{DateTime, Utc};
use serde_json::json;

/// ドキュメントDBのフィールド名対応表。ここ以外でフィールド名を読み書きしない。
pub mod collections {
    pub const POSTS: &str = "posts";
    pub const TOPICS: &str = "topics";
    pub const USERS: &str = "users";
}

pub mod fields {
    pub const AUTHOR_ID: &str = "author_id";
    pub const AUTHOR_NAME: &str = "author_name";
    pub const AUTHOR_AVATAR_URL: &str = "author_avatar_url";
    pub const TOPIC_ID: &str = "topic_id";
    pub const CONTENT: &str = "content";
    pub const IMAGE_URL: &str = "image_url";
    pub const CREATED_AT: &str = "created_at";
    pub const LIKE_COUNT: &str = "like_count";
    pub const LIKED_BY: &str = "liked_by";
    pub const BOOKMARKED_BY: &str = "bookmarked_by";

    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const POST_COUNT: &str = "post_count";
    pub const LAST_POSTED_AT: &str = "last_posted_at";

    pub const EMAIL: &str = "email";
    pub const BIO: &str = "bio";
    pub const AVATAR_URL: &str = "avatar_url";
    pub const UPDATED_AT: &str = "updated_at";
}

fn timestamp_field(doc: &Document, field: &str) -> Result<DateTime<Utc>, BackendError> {
    let millis = doc.i64_field(field)?;
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        BackendError::invalid_document(format!("field '{field}' is not a valid timestamp"))
    })
}

pub fn post_document(post: &Post) -> Document {
    Document::new(post.id.clone())
        .set(fields::AUTHOR_ID, json!(post.author_id))
        .set(fields::AUTHOR_NAME, json!(post.author_name))
        .set(fields::AUTHOR_AVATAR_URL, json!(post.author_avatar_url))
        .set(fields::TOPIC_ID, json!(post.topic_id))
        .set(fields::CONTENT, json!(post.content))
        .set(fields::IMAGE_URL, json!(post.image_url))
        .set(fields::CREATED_AT, json!(post.created_at.timestamp_millis()))
        .set(fields::LIKE_COUNT, json!(post.like_count))
        .set(fields::LIKED_BY, json!(post.liked_by))
        .set(fields::BOOKMARKED_BY, json!(post.bookmarked_by))
}

pub fn map_post(doc: &Document) -> Result<Post, BackendError> {
    Ok(Post {
        id: doc.id.clone(),
        author_id: doc.str_field(fields::AUTHOR_ID)?,
        author_name: doc.str_field(fields::AUTHOR_NAME)?,
        author_avatar_url: doc.opt_str_field(fields::AUTHOR_AVATAR_URL)?,
        topic_id: doc.str_field(fields::TOPIC_ID)?,
        content: doc.str_field(fields::CONTENT)?,
        image_url: doc.opt_str_field(fields::IMAGE_URL)?,
        created_at: timestamp_field(doc, fields::CREATED_AT)?,
        like_count: doc.u32_field(fields::LIKE_COUNT)?,
        liked_by: doc.str_list_field(fields::LIKED_BY)?,
        bookmarked_by: doc.str_list_field(fields::BOOKMARKED_BY)?,
    })
}

pub fn topic_document(topic: &Topic) -> Document {
    Document::new(topic.id.clone())
        .set(fields::NAME, json!(topic.name))
        .set(fields::DESCRIPTION, json!(topic.description))
        .set(fields::POST_COUNT, json!(topic.post_count))
        .set(fields::LAST_POSTED_AT, json!(topic.last_posted_at))
        .set(fields::CREATED_AT, json!(topic.created_at))
}

pub fn map_topic(doc: &Document) -> Result<Topic, BackendError> {
    Ok(Topic {
        id: doc.id.clone(),
        name: doc.str_field(fields::NAME)?,
        description: doc.opt_str_field(fields::DESCRIPTION)?,
        post_count: doc.u32_field(fields::POST_COUNT)?,
        last_posted_at: doc.opt_i64_field(fields::LAST_POSTED_AT)?,
        created_at: doc.i64_field(fields::CREATED_AT)?,
    })
}

pub fn user_document(user: &User) -> Document {
    Document::new(user.id.clone())
        .set(fields::NAME, json!(user.name))
        .set(fields::EMAIL, json!(user.email))
        .set(fields::BIO, json!(user.bio))
        .set(fields::AVATAR_URL, json!(user.avatar_url))
        .set(fields::CREATED_AT, json!(user.created_at.timestamp_millis()))
        .set(fields::UPDATED_AT, json!(user.updated_at.timestamp_millis()))
}

pub fn map_user(doc: &Document) -> Result<User, BackendError> {
    Ok(User {
        id: doc.id.clone(),
        name: doc.str_field(fields::NAME)?,
        email: doc.str_field(fields::EMAIL)?,
        bio: doc.str_field(fields::BIO)?,
        avatar_url: doc.opt_str_field(fields::AVATAR_URL)?,
        created_at: timestamp_field(doc, fields::CREATED_AT)?,
        updated_at: timestamp_field(doc, fields::UPDATED_AT)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user() -> User {
        let mut user = User::new(
            "uid-1".to_string(),
            "Alice".to_string(),
            "alice@example.com".to_string(),
        );
        user.bio = "hello".to_string();
        user.created_at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        user.updated_at = user.created_at;
        user
    }

    #[test]
    fn post_round_trips_through_document() {
        let mut post = Post::new("hi".to_string(), "rust".to_string(), &sample_user());
        post.created_at = Utc.timestamp_millis_opt(1_700_000_123_000).unwrap();
        post.liked_by = vec!["uid-2".to_string()];
        post.like_count = 1;
        post.image_url = Some("memory://posts/p/img".to_string());

        let mapped = map_post(&post_document(&post)).expect("map post");
        assert_eq!(mapped, post);
    }

    #[test]
    fn topic_round_trips_through_document() {
        let mut topic = Topic::new("Rust Lang");
        topic.post_count = 7;
        topic.last_posted_at = Some(1_700_000_000_000);

        let mapped = map_topic(&topic_document(&topic)).expect("map topic");
        assert_eq!(mapped, topic);
    }

    #[test]
    fn user_round_trips_through_document() {
        let user = sample_user();
        let mapped = map_user(&user_document(&user)).expect("map user");
        assert_eq!(mapped, user);
    }

    #[test]
    fn missing_field_surfaces_invalid_document() {
        let doc = Document::new("p1").set(fields::CONTENT, serde_json::json!("hi"));
        let err = map_post(&doc).unwrap_err();
        assert_eq!(err.code, "invalid-document");
    }
}
