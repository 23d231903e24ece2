use super::Validate;
use crate::domain::entities::Topic;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TopicResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub post_count: u32,
    pub last_posted_at: Option<i64>,
}

impl From<&Topic> for TopicResponse {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id.clone(),
            name: topic.name.clone(),
            description: topic.description.clone(),
            post_count: topic.post_count,
            last_posted_at: topic.last_posted_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchTopicsRequest {
    pub prefix: String,
    pub limit: Option<usize>,
}

impl Validate for SearchTopicsRequest {
    fn validate(&self) -> Result<(), String> {
        if self.prefix.trim().is_empty() {
            return Err("検索語が必要です".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TrendingStateResponse {
    pub topics: Vec<TopicResponse>,
    pub is_loading: bool,
    pub error: Option<String>,
}
