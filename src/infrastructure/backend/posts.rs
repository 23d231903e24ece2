use super::mapper::{self, collections, fields};
use super::store_repository::StoreRepository;
use crate::application::feed::Response;
use crate::application::ports::document_store::{Direction, FieldOp, Filter, Query};
use crate::application::ports::repositories::PostRepository;
use crate::domain::entities::Post;
use crate::shared::AppError;
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;

#[async_trait]
impl PostRepository for StoreRepository {
    async fn observe_recent(&self, limit: usize) -> mpsc::Receiver<Response<Vec<Post>>> {
        self.observe_posts(
            Query::new()
                .order_by(fields::CREATED_AT, Direction::Desc)
                .limit(limit),
        )
    }

    async fn observe_bookmarked(
        &self,
        user_id: &str,
        limit: usize,
    ) -> mpsc::Receiver<Response<Vec<Post>>> {
        self.observe_posts(
            Query::new()
                .filter(Filter::ArrayContains(
                    fields::BOOKMARKED_BY.to_string(),
                    json!(user_id),
                ))
                .order_by(fields::CREATED_AT, Direction::Desc)
                .limit(limit),
        )
    }

    async fn observe_by_topic(
        &self,
        topic_id: &str,
        limit: usize,
    ) -> mpsc::Receiver<Response<Vec<Post>>> {
        self.observe_posts(
            Query::new()
                .filter(Filter::Eq(fields::TOPIC_ID.to_string(), json!(topic_id)))
                .order_by(fields::CREATED_AT, Direction::Desc)
                .limit(limit),
        )
    }

    async fn observe_by_author(
        &self,
        author_id: &str,
        limit: usize,
    ) -> mpsc::Receiver<Response<Vec<Post>>> {
        self.observe_posts(
            Query::new()
                .filter(Filter::Eq(fields::AUTHOR_ID.to_string(), json!(author_id)))
                .order_by(fields::CREATED_AT, Direction::Desc)
                .limit(limit),
        )
    }

    async fn create_post(&self, post: &Post) -> Result<(), AppError> {
        self.store
            .put(collections::POSTS, mapper::post_document(post))
            .await?;
        Ok(())
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let doc = self.store.get(collections::POSTS, id).await?;
        match doc {
            Some(doc) => Ok(Some(mapper::map_post(&doc)?)),
            None => Ok(None),
        }
    }

    async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(collections::POSTS, id).await?;
        Ok(())
    }

    async fn set_like(&self, post_id: &str, user_id: &str, liked: bool) -> Result<Post, AppError> {
        let ops = if liked {
            vec![
                (
                    fields::LIKED_BY.to_string(),
                    FieldOp::ArrayUnion(json!(user_id)),
                ),
                (fields::LIKE_COUNT.to_string(), FieldOp::Increment(1)),
            ]
        } else {
            vec![
                (
                    fields::LIKED_BY.to_string(),
                    FieldOp::ArrayRemove(json!(user_id)),
                ),
                (fields::LIKE_COUNT.to_string(), FieldOp::Increment(-1)),
            ]
        };
        let doc = self.store.update(collections::POSTS, post_id, ops).await?;
        Ok(mapper::map_post(&doc)?)
    }

    async fn set_bookmark(
        &self,
        post_id: &str,
        user_id: &str,
        bookmarked: bool,
    ) -> Result<Post, AppError> {
        let op = if bookmarked {
            FieldOp::ArrayUnion(json!(user_id))
        } else {
            FieldOp::ArrayRemove(json!(user_id))
        };
        let doc = self
            .store
            .update(
                collections::POSTS,
                post_id,
                vec![(fields::BOOKMARKED_BY.to_string(), op)],
            )
            .await?;
        Ok(mapper::map_post(&doc)?)
    }
}
