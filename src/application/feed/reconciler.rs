use super::response::Response;
use super::state::{FeedTuning, PaginationState, PostsState};
use crate::domain::entities::Post;
use crate::shared::AppError;
use std::collections::HashSet;

pub const DEFAULT_FEED_ERROR: &str = "フィードの取得に失敗しました";

/// 非同期レスポンスをUI状態とページネーション状態へ畳み込むリデューサ。
/// 並行性は持たない。正しさは上流のストリームが順序通り直列に
/// エミッションを届けることに依存する。
#[derive(Debug)]
pub struct FeedReconciler {
    posts: PostsState,
    pagination: PaginationState,
    tuning: FeedTuning,
}

impl FeedReconciler {
    pub fn new(tuning: FeedTuning) -> Self {
        Self {
            posts: PostsState::default(),
            pagination: PaginationState::new(tuning.initial_limit),
            tuning,
        }
    }

    pub fn posts(&self) -> &PostsState {
        &self.posts
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    /// 次回の購読で要求する件数
    pub fn requested(&self) -> usize {
        self.pagination.num_of_items
    }

    pub fn apply(&mut self, response: Response<Vec<Post>>) {
        match response {
            Response::Loading => self.on_loading(),
            Response::Success(page) => self.on_success(page),
            Response::Failure(err) => self.on_failure(&err),
        }
    }

    /// リストが空のときだけローディングを立てる。
    /// データを持ったままのリフレッシュで画面をちらつかせない。
    pub fn on_loading(&mut self) {
        if self.posts.posts.is_empty() {
            self.posts.is_loading = true;
        }
    }

    /// 最新ページでリストを置き換え、末尾到達を再計算する。
    /// 要求より少ない件数が返った、または未見のidが1件もなければ末尾。
    pub fn on_success(&mut self, page: Vec<Post>) {
        let requested = self.pagination.num_of_items;
        let seen: HashSet<&str> = self.posts.posts.iter().map(|p| p.id.as_str()).collect();
        let has_unseen = page.iter().any(|p| !seen.contains(p.id.as_str()));
        let end_reached = page.len() < requested || !has_unseen;

        self.posts.posts = page;
        self.posts.is_loading = false;
        self.posts.error = None;

        self.pagination.end_reached = end_reached;
        if !end_reached {
            self.pagination.num_of_items += self.tuning.page_step;
        }
    }

    pub fn on_failure(&mut self, err: &AppError) {
        let message = err.user_message();
        self.posts.error = if message.is_empty() {
            Some(DEFAULT_FEED_ERROR.to_string())
        } else {
            Some(message)
        };
        self.posts.is_loading = false;
    }
}
