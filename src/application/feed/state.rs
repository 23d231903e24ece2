use crate::domain::entities::Post;
use crate::shared::config::FeedConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 画面が観測する投稿リストの状態。リコンサイラだけが書き換える。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostsState {
    pub posts: Vec<Post>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// ページネーションの帳簿。num_of_itemsは次回リクエストで要求する
/// 総件数（オフセットではない）で、成功のたびに固定幅で増える。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationState {
    pub num_of_items: usize,
    pub end_reached: bool,
}

impl PaginationState {
    pub fn new(initial_limit: usize) -> Self {
        Self {
            num_of_items: initial_limit,
            end_reached: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FeedTuning {
    pub initial_limit: usize,
    pub page_step: usize,
    pub load_more_threshold: usize,
    pub debounce: Duration,
}

impl Default for FeedTuning {
    fn default() -> Self {
        Self {
            initial_limit: 10,
            page_step: 5,
            load_more_threshold: 3,
            debounce: Duration::from_millis(500),
        }
    }
}

impl From<&FeedConfig> for FeedTuning {
    fn from(cfg: &FeedConfig) -> Self {
        Self {
            initial_limit: cfg.initial_limit,
            page_step: cfg.page_step,
            load_more_threshold: cfg.load_more_threshold,
            debounce: Duration::from_millis(cfg.debounce_ms),
        }
    }
}
