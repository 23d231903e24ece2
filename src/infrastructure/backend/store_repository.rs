use super::mapper;
use crate::application::feed::Response;
use crate::application::ports::document_store::{Document, DocumentStore, Query};
use crate::domain::entities::{Post, Topic};
use std::sync::Arc;
use tokio::sync::mpsc;

const FEED_BUFFER: usize = 8;

/// DocumentStoreの上にPost/Topic/Userの各リポジトリを実装するアダプタ。
/// フィールド名の読み書きはすべてmapper経由。
pub struct StoreRepository {
    pub(super) store: Arc<dyn DocumentStore>,
}

impl StoreRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// 投稿クエリをResponseストリームへ変換する。
    /// Loadingを即時に流してからバックエンドの購読を開始し、
    /// 以降のエミッションをSuccess/Failureへ写す。
    pub(super) fn observe_posts(&self, query: Query) -> mpsc::Receiver<Response<Vec<Post>>> {
        observe_collection(
            Arc::clone(&self.store),
            mapper::collections::POSTS,
            query,
            mapper::map_post,
        )
    }

    pub(super) fn observe_topics(&self, query: Query) -> mpsc::Receiver<Response<Vec<Topic>>> {
        observe_collection(
            Arc::clone(&self.store),
            mapper::collections::TOPICS,
            query,
            mapper::map_topic,
        )
    }
}

fn observe_collection<T, F>(
    store: Arc<dyn DocumentStore>,
    collection: &'static str,
    query: Query,
    map: F,
) -> mpsc::Receiver<Response<Vec<T>>>
where
    T: Send + 'static,
    F: Fn(&Document) -> Result<T, crate::application::ports::BackendError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(FEED_BUFFER);

    tokio::spawn(async move {
        if tx.send(Response::Loading).await.is_err() {
            return;
        }

        let mut updates = store.listen(collection, query).await;
        while let Some(result) = updates.recv().await {
            let response = match result {
                Ok(docs) => match docs.iter().map(&map).collect::<Result<Vec<_>, _>>() {
                    Ok(items) => Response::Success(items),
                    Err(err) => Response::Failure(err.into()),
                },
                Err(err) => Response::Failure(err.into()),
            };
            if tx.send(response).await.is_err() {
                break;
            }
        }
    });

    rx
}
