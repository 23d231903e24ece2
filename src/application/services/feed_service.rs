use crate::application::feed::{
    FeedReconciler, FeedTuning, LoadMoreTrigger, PaginationState, PostsState, Response,
};
use crate::application::ports::repositories::PostRepository;
use crate::domain::entities::Post;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

/// どの画面のフィードを購読するか
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    Recent,
    Bookmarks { user_id: String },
    Topic { topic_id: String },
    Author { user_id: String },
}

/// 画面1枚ぶんのフィードステートホルダー。
/// リポジトリのストリームを1本のタスクで畳み込み、watchチャネルで
/// PostsStateのスナップショットを公開する。エミッションの消費は
/// フィードごとに単一タスクなので畳み込みは直列になる。
pub struct PostsFeedService {
    repository: Arc<dyn PostRepository>,
    scope: FeedScope,
    reconciler: Arc<Mutex<FeedReconciler>>,
    trigger: Mutex<LoadMoreTrigger>,
    state_tx: watch::Sender<PostsState>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl PostsFeedService {
    pub fn new(repository: Arc<dyn PostRepository>, scope: FeedScope, tuning: FeedTuning) -> Self {
        let (state_tx, _) = watch::channel(PostsState::default());
        Self {
            repository,
            scope,
            reconciler: Arc::new(Mutex::new(FeedReconciler::new(tuning))),
            trigger: Mutex::new(LoadMoreTrigger::new(
                tuning.load_more_threshold,
                tuning.debounce,
            )),
            state_tx,
            listener: Mutex::new(None),
        }
    }

    /// UIが観測する状態ストリーム
    pub fn state(&self) -> watch::Receiver<PostsState> {
        self.state_tx.subscribe()
    }

    pub async fn pagination(&self) -> PaginationState {
        self.reconciler.lock().await.pagination()
    }

    pub async fn start(&self) {
        let limit = self.reconciler.lock().await.requested();
        self.subscribe(limit).await;
    }

    /// 現在のウィンドウのまま購読し直す。状態はリセットしない。
    pub async fn refresh(&self) {
        let limit = self.reconciler.lock().await.requested();
        self.subscribe(limit).await;
    }

    /// 成功時に広がったウィンドウで購読し直す
    pub async fn load_more(&self) {
        let limit = self.reconciler.lock().await.requested();
        debug!(scope = ?self.scope, limit, "feed load_more");
        self.subscribe(limit).await;
    }

    /// スクロール位置の通知。末尾に近づいたら追加ロードを行う。
    pub async fn on_scroll(&self, last_visible_index: usize) {
        let (is_loading, end_reached, rendered_len) = {
            let reconciler = self.reconciler.lock().await;
            let pagination = reconciler.pagination();
            (
                reconciler.posts().is_loading,
                pagination.end_reached,
                reconciler.posts().posts.len(),
            )
        };
        if is_loading || end_reached {
            return;
        }

        let fired = {
            let mut trigger = self.trigger.lock().await;
            trigger.should_fire(last_visible_index, rendered_len, Instant::now())
        };
        if fired {
            self.load_more().await;
        }
    }

    /// 画面破棄に相当する。リスナータスクを止める。
    pub async fn shutdown(&self) {
        if let Some(handle) = self.listener.lock().await.take() {
            handle.abort();
        }
    }

    async fn subscribe(&self, limit: usize) {
        // 前の購読を止めてから張り替える。畳み込みが交錯しないように。
        if let Some(previous) = self.listener.lock().await.take() {
            previous.abort();
        }

        let rx = self.open_stream(limit).await;
        let reconciler = Arc::clone(&self.reconciler);
        let state_tx = self.state_tx.clone();

        let handle = tokio::spawn(async move {
            let mut rx = rx;
            while let Some(response) = rx.recv().await {
                let mut reconciler = reconciler.lock().await;
                reconciler.apply(response);
                state_tx.send_replace(reconciler.posts().clone());
            }
        });

        *self.listener.lock().await = handle.into();
    }

    async fn open_stream(&self, limit: usize) -> mpsc::Receiver<Response<Vec<Post>>> {
        match &self.scope {
            FeedScope::Recent => self.repository.observe_recent(limit).await,
            FeedScope::Bookmarks { user_id } => {
                self.repository.observe_bookmarked(user_id, limit).await
            }
            FeedScope::Topic { topic_id } => self.repository.observe_by_topic(topic_id, limit).await,
            FeedScope::Author { user_id } => self.repository.observe_by_author(user_id, limit).await,
        }
    }
}

impl Drop for PostsFeedService {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.listener.try_lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::repositories::PostRepository;
    use crate::domain::entities::User;
    use crate::shared::AppError;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::time::timeout;

    #[derive(Debug, Clone, PartialEq)]
    struct ObserveCall {
        scope: String,
        limit: usize,
    }

    /// 固定されたレスポンス列を流すテスト用リポジトリ
    struct TestPostRepository {
        pages: Mutex<Vec<Vec<Response<Vec<Post>>>>>,
        calls: Mutex<Vec<ObserveCall>>,
    }

    impl TestPostRepository {
        fn new(pages: Vec<Vec<Response<Vec<Post>>>>) -> Self {
            Self {
                pages: Mutex::new(pages),
                calls: Mutex::new(Vec::new()),
            }
        }

        async fn calls(&self) -> Vec<ObserveCall> {
            self.calls.lock().await.clone()
        }

        async fn open(&self, scope: &str, limit: usize) -> mpsc::Receiver<Response<Vec<Post>>> {
            self.calls.lock().await.push(ObserveCall {
                scope: scope.to_string(),
                limit,
            });
            let mut pages = self.pages.lock().await;
            let emissions = if pages.is_empty() {
                Vec::new()
            } else {
                pages.remove(0)
            };
            let (tx, rx) = mpsc::channel(8);
            tokio::spawn(async move {
                let _ = tx.send(Response::Loading).await;
                for emission in emissions {
                    let _ = tx.send(emission).await;
                }
                // ストリームは開いたままにする（リスナー型の購読を模す）
                tx.closed().await;
            });
            rx
        }
    }

    #[async_trait]
    impl PostRepository for TestPostRepository {
        async fn observe_recent(&self, limit: usize) -> mpsc::Receiver<Response<Vec<Post>>> {
            self.open("recent", limit).await
        }
        async fn observe_bookmarked(
            &self,
            _user_id: &str,
            limit: usize,
        ) -> mpsc::Receiver<Response<Vec<Post>>> {
            self.open("bookmarked", limit).await
        }
        async fn observe_by_topic(
            &self,
            _topic_id: &str,
            limit: usize,
        ) -> mpsc::Receiver<Response<Vec<Post>>> {
            self.open("topic", limit).await
        }
        async fn observe_by_author(
            &self,
            _author_id: &str,
            limit: usize,
        ) -> mpsc::Receiver<Response<Vec<Post>>> {
            self.open("author", limit).await
        }
        async fn create_post(&self, _post: &Post) -> Result<(), AppError> {
            Ok(())
        }
        async fn get_post(&self, _id: &str) -> Result<Option<Post>, AppError> {
            Ok(None)
        }
        async fn delete_post(&self, _id: &str) -> Result<(), AppError> {
            Ok(())
        }
        async fn set_like(
            &self,
            _post_id: &str,
            _user_id: &str,
            _liked: bool,
        ) -> Result<Post, AppError> {
            Err(AppError::Internal("unused".into()))
        }
        async fn set_bookmark(
            &self,
            _post_id: &str,
            _user_id: &str,
            _bookmarked: bool,
        ) -> Result<Post, AppError> {
            Err(AppError::Internal("unused".into()))
        }
    }

    fn posts(ids: &[&str]) -> Vec<Post> {
        let author = User::new(
            "uid-1".to_string(),
            "Alice".to_string(),
            "alice@example.com".to_string(),
        );
        ids.iter()
            .map(|id| {
                let mut post = Post::new(format!("content-{id}"), "rust".to_string(), &author);
                post.id = id.to_string();
                post
            })
            .collect()
    }

    fn tuning() -> FeedTuning {
        FeedTuning {
            initial_limit: 4,
            page_step: 2,
            load_more_threshold: 1,
            debounce: Duration::from_millis(0),
        }
    }

    async fn wait_for<F>(rx: &mut watch::Receiver<PostsState>, mut predicate: F) -> PostsState
    where
        F: FnMut(&PostsState) -> bool,
    {
        timeout(Duration::from_secs(2), async {
            loop {
                let state = rx.borrow().clone();
                if predicate(&state) {
                    return state;
                }
                rx.changed().await.expect("state channel open");
            }
        })
        .await
        .expect("state condition within 2s")
    }

    #[tokio::test]
    async fn start_folds_stream_into_observable_state() {
        let repo = Arc::new(TestPostRepository::new(vec![vec![Response::Success(
            posts(&["a", "b", "c", "d"]),
        )]]));
        let service =
            PostsFeedService::new(repo.clone(), FeedScope::Recent, tuning());
        let mut state = service.state();

        service.start().await;

        let snapshot = wait_for(&mut state, |s| s.posts.len() == 4).await;
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_none());

        let pagination = service.pagination().await;
        assert!(!pagination.end_reached);
        assert_eq!(pagination.num_of_items, 6, "window advanced by page_step");
        assert_eq!(
            repo.calls().await,
            vec![ObserveCall {
                scope: "recent".to_string(),
                limit: 4
            }]
        );
    }

    #[tokio::test]
    async fn scroll_near_end_triggers_load_more_with_wider_window() {
        let repo = Arc::new(TestPostRepository::new(vec![
            vec![Response::Success(posts(&["a", "b", "c", "d"]))],
            vec![Response::Success(posts(&["a", "b", "c", "d", "e", "f"]))],
        ]));
        let service =
            PostsFeedService::new(repo.clone(), FeedScope::Recent, tuning());
        let mut state = service.state();

        service.start().await;
        wait_for(&mut state, |s| s.posts.len() == 4).await;

        service.on_scroll(3).await;
        wait_for(&mut state, |s| s.posts.len() == 6).await;

        let calls = repo.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].limit, 6);

        let pagination = service.pagination().await;
        assert_eq!(pagination.num_of_items, 8);
    }

    #[tokio::test]
    async fn scroll_far_from_end_does_not_load_more() {
        let repo = Arc::new(TestPostRepository::new(vec![vec![Response::Success(
            posts(&["a", "b", "c", "d"]),
        )]]));
        let service =
            PostsFeedService::new(repo.clone(), FeedScope::Recent, tuning());
        let mut state = service.state();

        service.start().await;
        wait_for(&mut state, |s| s.posts.len() == 4).await;

        service.on_scroll(0).await;

        assert_eq!(repo.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn scroll_after_end_reached_is_ignored() {
        // 要求4件に対して2件しか返らないので末尾到達
        let repo = Arc::new(TestPostRepository::new(vec![vec![Response::Success(
            posts(&["a", "b"]),
        )]]));
        let service =
            PostsFeedService::new(repo.clone(), FeedScope::Recent, tuning());
        let mut state = service.state();

        service.start().await;
        wait_for(&mut state, |s| s.posts.len() == 2).await;
        assert!(service.pagination().await.end_reached);

        service.on_scroll(1).await;
        assert_eq!(repo.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn failure_is_surfaced_as_error_state() {
        let repo = Arc::new(TestPostRepository::new(vec![vec![Response::Failure(
            AppError::backend("unavailable", "transport closed"),
        )]]));
        let service = PostsFeedService::new(repo, FeedScope::Recent, tuning());
        let mut state = service.state();

        service.start().await;

        let snapshot = wait_for(&mut state, |s| s.error.is_some()).await;
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn bookmarks_scope_uses_bookmarked_stream() {
        let repo = Arc::new(TestPostRepository::new(vec![vec![Response::Success(
            posts(&["a"]),
        )]]));
        let service = PostsFeedService::new(
            repo.clone(),
            FeedScope::Bookmarks {
                user_id: "uid-1".to_string(),
            },
            tuning(),
        );
        let mut state = service.state();

        service.start().await;
        wait_for(&mut state, |s| s.posts.len() == 1).await;

        assert_eq!(repo.calls().await[0].scope, "bookmarked");
        service.shutdown().await;
    }
}
