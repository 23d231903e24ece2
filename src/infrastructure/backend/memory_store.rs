use crate::application::ports::document_store::{
    BackendError, Direction, Document, DocumentStore, FieldOp, Filter, Query,
};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::{mpsc, Mutex, RwLock};

const LISTEN_BUFFER: usize = 16;

struct Listener {
    collection: String,
    query: Query,
    tx: mpsc::Sender<Result<Vec<Document>, BackendError>>,
}

/// テストとデモ用のインメモリDocumentStore。
/// listenは登録時に現在の結果を1回流し、以降は該当コレクションの
/// 変更ごとにクエリを再評価して流す。通知は直列なので順序は保たれる。
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, BTreeMap<String, Document>>>,
    listeners: Mutex<Vec<Listener>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn snapshot(&self, collection: &str) -> BTreeMap<String, Document> {
        let data = self.data.read().await;
        data.get(collection).cloned().unwrap_or_default()
    }

    async fn notify(&self, collection: &str) {
        let snapshot = self.snapshot(collection).await;
        let mut listeners = self.listeners.lock().await;
        let mut alive = Vec::with_capacity(listeners.len());
        for listener in listeners.drain(..) {
            if listener.collection != collection {
                alive.push(listener);
                continue;
            }
            let results = run_query(&snapshot, &listener.query);
            // 受信側が破棄されたリスナーはここで取り除く
            if listener.tx.send(Ok(results)).await.is_ok() {
                alive.push(listener);
            }
        }
        *listeners = alive;
    }
}

fn matches(doc: &Document, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(field, expected) => doc.get(field) == Some(expected),
        Filter::ArrayContains(field, expected) => match doc.get(field) {
            Some(Value::Array(items)) => items.contains(expected),
            _ => false,
        },
        Filter::Prefix(field, prefix) => {
            let value = if field == "id" {
                Some(doc.id.as_str())
            } else {
                doc.get(field).and_then(Value::as_str)
            };
            value.is_some_and(|v| v.starts_with(prefix.as_str()))
        }
    }
}

fn compare_field(a: &Document, b: &Document, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_i64().unwrap_or_default().cmp(&y.as_i64().unwrap_or_default())
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) | (Some(_), Some(Value::Null)) => Ordering::Greater,
        (None, Some(_)) | (Some(Value::Null), Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

fn run_query(collection: &BTreeMap<String, Document>, query: &Query) -> Vec<Document> {
    let mut results: Vec<Document> = collection
        .values()
        .filter(|doc| query.filters.iter().all(|f| matches(doc, f)))
        .cloned()
        .collect();

    if let Some((field, direction)) = &query.order_by {
        results.sort_by(|a, b| {
            let ordering = compare_field(a, b, field);
            match direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });
    }

    if let Some(limit) = query.limit {
        results.truncate(limit);
    }

    results
}

fn apply_op(doc: &mut Document, field: &str, op: FieldOp) -> Result<(), BackendError> {
    match op {
        FieldOp::Set(value) => {
            doc.fields.insert(field.to_string(), value);
        }
        FieldOp::Increment(delta) => {
            let current = doc.get(field).and_then(Value::as_i64).unwrap_or_default();
            doc.fields
                .insert(field.to_string(), Value::from(current + delta));
        }
        FieldOp::ArrayUnion(value) => {
            let entry = doc
                .fields
                .entry(field.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            match entry {
                Value::Array(items) => {
                    if !items.contains(&value) {
                        items.push(value);
                    }
                }
                other => {
                    return Err(BackendError::invalid_document(format!(
                        "array-union on non-array field '{field}': {other:?}"
                    )))
                }
            }
        }
        FieldOp::ArrayRemove(value) => {
            if let Some(Value::Array(items)) = doc.fields.get_mut(field) {
                items.retain(|item| item != &value);
            }
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, BackendError> {
        let data = self.data.read().await;
        Ok(data.get(collection).and_then(|docs| docs.get(id)).cloned())
    }

    async fn query(&self, collection: &str, query: Query) -> Result<Vec<Document>, BackendError> {
        let snapshot = self.snapshot(collection).await;
        Ok(run_query(&snapshot, &query))
    }

    async fn listen(
        &self,
        collection: &str,
        query: Query,
    ) -> mpsc::Receiver<Result<Vec<Document>, BackendError>> {
        let (tx, rx) = mpsc::channel(LISTEN_BUFFER);

        let snapshot = self.snapshot(collection).await;
        let initial = run_query(&snapshot, &query);
        let _ = tx.send(Ok(initial)).await;

        let mut listeners = self.listeners.lock().await;
        listeners.push(Listener {
            collection: collection.to_string(),
            query,
            tx,
        });

        rx
    }

    async fn put(&self, collection: &str, document: Document) -> Result<(), BackendError> {
        {
            let mut data = self.data.write().await;
            data.entry(collection.to_string())
                .or_default()
                .insert(document.id.clone(), document);
        }
        self.notify(collection).await;
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        ops: Vec<(String, FieldOp)>,
    ) -> Result<Document, BackendError> {
        let updated = {
            let mut data = self.data.write().await;
            let doc = data
                .get_mut(collection)
                .and_then(|docs| docs.get_mut(id))
                .ok_or_else(|| {
                    BackendError::not_found(format!("document {collection}/{id} not found"))
                })?;
            for (field, op) in ops {
                apply_op(doc, &field, op)?;
            }
            doc.clone()
        };
        self.notify(collection).await;
        Ok(updated)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), BackendError> {
        {
            let mut data = self.data.write().await;
            if let Some(docs) = data.get_mut(collection) {
                docs.remove(id);
            }
        }
        self.notify(collection).await;
        Ok(())
    }
}
