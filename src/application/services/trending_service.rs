use crate::application::feed::Response;
use crate::application::ports::repositories::TopicRepository;
use crate::domain::entities::Topic;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

/// トレンドトピック画面の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendingState {
    pub topics: Vec<Topic>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// 絞り込まれたトピック購読をTrendingStateへ畳み込む。
/// エミッションごとの並び替えだけをクライアント側で行う。
pub struct TrendingService {
    repository: Arc<dyn TopicRepository>,
    limit: usize,
    state_tx: watch::Sender<TrendingState>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl TrendingService {
    pub fn new(repository: Arc<dyn TopicRepository>, limit: usize) -> Self {
        let (state_tx, _) = watch::channel(TrendingState::default());
        Self {
            repository,
            limit,
            state_tx,
            listener: Mutex::new(None),
        }
    }

    pub fn state(&self) -> watch::Receiver<TrendingState> {
        self.state_tx.subscribe()
    }

    pub async fn start(&self) {
        if let Some(previous) = self.listener.lock().await.take() {
            previous.abort();
        }

        let mut rx = self.repository.observe_trending(self.limit).await;
        let state_tx = self.state_tx.clone();

        let handle = tokio::spawn(async move {
            while let Some(response) = rx.recv().await {
                state_tx.send_modify(|state| match response {
                    Response::Loading => {
                        if state.topics.is_empty() {
                            state.is_loading = true;
                        }
                    }
                    Response::Success(mut topics) => {
                        sort_trending(&mut topics);
                        state.topics = topics;
                        state.is_loading = false;
                        state.error = None;
                    }
                    Response::Failure(err) => {
                        state.error = Some(err.user_message());
                        state.is_loading = false;
                    }
                });
            }
        });

        *self.listener.lock().await = handle.into();
    }

    pub async fn shutdown(&self) {
        if let Some(handle) = self.listener.lock().await.take() {
            handle.abort();
        }
    }
}

impl Drop for TrendingService {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.listener.try_lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }
}

/// 投稿数降順、同数なら最終投稿の新しい順、最後に名前順
fn sort_trending(topics: &mut [Topic]) {
    topics.sort_by(|a, b| {
        b.post_count
            .cmp(&a.post_count)
            .then_with(|| {
                b.last_posted_at
                    .unwrap_or(i64::MIN)
                    .cmp(&a.last_posted_at.unwrap_or(i64::MIN))
            })
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::repositories::TopicRepository;
    use crate::infrastructure::backend::{MemoryStore, StoreRepository};
    use std::time::Duration;
    use tokio::time::timeout;

    fn topic(name: &str, post_count: u32, last_posted_at: Option<i64>) -> Topic {
        let mut topic = Topic::new(name);
        topic.post_count = post_count;
        topic.last_posted_at = last_posted_at;
        topic
    }

    #[test]
    fn sort_orders_by_count_then_recency_then_name() {
        let mut topics = vec![
            topic("zeta", 3, Some(100)),
            topic("alpha", 3, Some(200)),
            topic("beta", 5, None),
            topic("gamma", 3, Some(200)),
        ];
        sort_trending(&mut topics);

        let names: Vec<&str> = topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["beta", "alpha", "gamma", "zeta"]);
    }

    #[tokio::test]
    async fn start_publishes_sorted_snapshots() {
        let repository = Arc::new(StoreRepository::new(Arc::new(MemoryStore::new())));
        repository.upsert_topic(&topic("quiet", 1, Some(10))).await.unwrap();
        repository.upsert_topic(&topic("busy", 9, Some(20))).await.unwrap();

        let service = TrendingService::new(
            Arc::clone(&repository) as Arc<dyn TopicRepository>,
            10,
        );
        let mut state = service.state();
        service.start().await;

        let snapshot = timeout(Duration::from_secs(2), async {
            loop {
                let current = state.borrow().clone();
                if current.topics.len() == 2 {
                    return current;
                }
                state.changed().await.expect("state channel open");
            }
        })
        .await
        .expect("trending snapshot within 2s");

        assert_eq!(snapshot.topics[0].name, "busy");
        assert!(!snapshot.is_loading);

        // 新しいトピックが伸びたら順位が入れ替わる
        repository.upsert_topic(&topic("rising", 20, Some(30))).await.unwrap();
        let snapshot = timeout(Duration::from_secs(2), async {
            loop {
                let current = state.borrow().clone();
                if current.topics.first().map(|t| t.name.as_str()) == Some("rising") {
                    return current;
                }
                state.changed().await.expect("state channel open");
            }
        })
        .await
        .expect("updated snapshot within 2s");
        assert_eq!(snapshot.topics.len(), 3);

        service.shutdown().await;
    }
}
