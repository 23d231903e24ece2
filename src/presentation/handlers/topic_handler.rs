use crate::application::ports::repositories::TopicRepository;
use crate::application::services::TrendingService;
use crate::presentation::dto::{
    topic_dto::{SearchTopicsRequest, TopicResponse, TrendingStateResponse},
    ApiResponse, Validate,
};
use crate::shared::AppError;
use std::sync::Arc;

const DEFAULT_SEARCH_LIMIT: usize = 20;

pub struct TopicHandler {
    topics: Arc<dyn TopicRepository>,
    trending: Arc<TrendingService>,
}

impl TopicHandler {
    pub fn new(topics: Arc<dyn TopicRepository>, trending: Arc<TrendingService>) -> Self {
        Self { topics, trending }
    }

    pub async fn search_topics(
        &self,
        request: SearchTopicsRequest,
    ) -> ApiResponse<Vec<TopicResponse>> {
        // 入力検証
        if let Err(e) = request.validate() {
            return ApiResponse::from_app_error(AppError::InvalidInput(e));
        }

        let limit = request.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        let result = self
            .topics
            .search_topics(&request.prefix, limit)
            .await
            .map(|topics| topics.iter().map(TopicResponse::from).collect());
        ApiResponse::from_result(result)
    }

    pub async fn start_trending(&self) {
        self.trending.start().await;
    }

    pub async fn trending_state(&self) -> TrendingStateResponse {
        let state = self.trending.state().borrow().clone();
        TrendingStateResponse {
            topics: state.topics.iter().map(TopicResponse::from).collect(),
            is_loading: state.is_loading,
            error: state.error,
        }
    }
}
