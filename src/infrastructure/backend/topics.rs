use super::mapper::{self, collections, fields};
use super::store_repository::StoreRepository;
use crate::application::feed::Response;
use crate::application::ports::document_store::{Direction, FieldOp, Filter, Query};
use crate::application::ports::repositories::TopicRepository;
use crate::domain::entities::Topic;
use crate::shared::AppError;
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;

#[async_trait]
impl TopicRepository for StoreRepository {
    async fn observe_trending(&self, limit: usize) -> mpsc::Receiver<Response<Vec<Topic>>> {
        // 購読自体をpost_count降順+limitで絞る。コレクション全体の
        // 再フェッチはしない。
        self.observe_topics(
            Query::new()
                .order_by(fields::POST_COUNT, Direction::Desc)
                .limit(limit),
        )
    }

    async fn search_topics(&self, prefix: &str, limit: usize) -> Result<Vec<Topic>, AppError> {
        let normalized = Topic::normalize_id(prefix);
        if normalized.is_empty() {
            return Ok(Vec::new());
        }
        let docs = self
            .store
            .query(
                collections::TOPICS,
                Query::new()
                    .filter(Filter::Prefix("id".to_string(), normalized))
                    .limit(limit),
            )
            .await?;
        let topics = docs
            .iter()
            .map(mapper::map_topic)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(topics)
    }

    async fn get_topic(&self, id: &str) -> Result<Option<Topic>, AppError> {
        let doc = self.store.get(collections::TOPICS, id).await?;
        match doc {
            Some(doc) => Ok(Some(mapper::map_topic(&doc)?)),
            None => Ok(None),
        }
    }

    async fn upsert_topic(&self, topic: &Topic) -> Result<(), AppError> {
        self.store
            .put(collections::TOPICS, mapper::topic_document(topic))
            .await?;
        Ok(())
    }

    async fn record_post(&self, topic_id: &str, at: i64) -> Result<Topic, AppError> {
        let doc = self
            .store
            .update(
                collections::TOPICS,
                topic_id,
                vec![
                    (fields::POST_COUNT.to_string(), FieldOp::Increment(1)),
                    (fields::LAST_POSTED_AT.to_string(), FieldOp::Set(json!(at))),
                ],
            )
            .await?;
        Ok(mapper::map_topic(&doc)?)
    }
}
