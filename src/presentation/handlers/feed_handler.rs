use crate::application::services::PostsFeedService;
use crate::presentation::dto::post_dto::{FeedStateResponse, ScrollEvent};
use std::sync::Arc;

/// フィード画面1枚ぶんの境界。シェルはこれ経由で購読と
/// スクロール通知だけを行う。
pub struct FeedHandler {
    feed: Arc<PostsFeedService>,
    viewer: Option<String>,
}

impl FeedHandler {
    pub fn new(feed: Arc<PostsFeedService>, viewer: Option<String>) -> Self {
        Self { feed, viewer }
    }

    pub async fn start(&self) {
        self.feed.start().await;
    }

    pub async fn refresh(&self) {
        self.feed.refresh().await;
    }

    pub async fn on_scroll(&self, event: ScrollEvent) {
        self.feed.on_scroll(event.last_visible_index).await;
    }

    /// 現在の状態スナップショットを描画用DTOへ写す
    pub async fn state(&self) -> FeedStateResponse {
        let state = self.feed.state().borrow().clone();
        let pagination = self.feed.pagination().await;
        FeedStateResponse::from_state(&state, pagination, self.viewer.as_deref())
    }

    pub async fn shutdown(&self) {
        self.feed.shutdown().await;
    }
}
