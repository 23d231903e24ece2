use crate::shared::AppError;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

/// ベンダーSDKが返す生のエラー。コードはSDK側の文字列をそのまま保持する。
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct BackendError {
    pub code: String,
    pub message: String,
}

impl BackendError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::new("invalid-document", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not-found", message)
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        AppError::Backend {
            code: err.code,
            message: err.message,
        }
    }
}

/// ドキュメントDBの1レコード。フィールド名は文字列キー。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: serde_json::Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: serde_json::Map::new(),
        }
    }

    pub fn set(mut self, field: &str, value: Value) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn str_field(&self, field: &str) -> Result<String, BackendError> {
        match self.fields.get(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            other => Err(BackendError::invalid_document(format!(
                "expected string field '{field}', got {other:?}"
            ))),
        }
    }

    /// 欠落とnullはNone。型違いのみエラー。
    pub fn opt_str_field(&self, field: &str) -> Result<Option<String>, BackendError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            other => Err(BackendError::invalid_document(format!(
                "expected string field '{field}', got {other:?}"
            ))),
        }
    }

    pub fn i64_field(&self, field: &str) -> Result<i64, BackendError> {
        match self.fields.get(field).and_then(Value::as_i64) {
            Some(v) => Ok(v),
            None => Err(BackendError::invalid_document(format!(
                "expected integer field '{field}'"
            ))),
        }
    }

    pub fn opt_i64_field(&self, field: &str) -> Result<Option<i64>, BackendError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| {
                BackendError::invalid_document(format!("expected integer field '{field}'"))
            }),
        }
    }

    pub fn u32_field(&self, field: &str) -> Result<u32, BackendError> {
        let value = self.i64_field(field)?;
        u32::try_from(value).map_err(|_| {
            BackendError::invalid_document(format!(
                "field '{field}' out of range for u32: {value}"
            ))
        })
    }

    pub fn str_list_field(&self, field: &str) -> Result<Vec<String>, BackendError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(BackendError::invalid_document(format!(
                        "expected string list field '{field}', got element {other:?}"
                    ))),
                })
                .collect(),
            other => Err(BackendError::invalid_document(format!(
                "expected list field '{field}', got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    ArrayContains(String, Value),
    Prefix(String, String),
}

/// クエリビルダー。コレクション内の絞り込みと並び替えのみを表す。
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// 原子的な read-modify-write 操作。ベンダーのトランザクションに相当する。
#[derive(Debug, Clone)]
pub enum FieldOp {
    Set(Value),
    Increment(i64),
    ArrayUnion(Value),
    ArrayRemove(Value),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, BackendError>;

    async fn query(&self, collection: &str, query: Query) -> Result<Vec<Document>, BackendError>;

    /// 現在の結果セットを即時に1回流し、以降は該当コレクションが変化する
    /// たびに再評価した結果を流す。エミッションは順序保証・直列。
    async fn listen(
        &self,
        collection: &str,
        query: Query,
    ) -> mpsc::Receiver<Result<Vec<Document>, BackendError>>;

    /// create or replace
    async fn put(&self, collection: &str, document: Document) -> Result<(), BackendError>;

    async fn update(
        &self,
        collection: &str,
        id: &str,
        ops: Vec<(String, FieldOp)>,
    ) -> Result<Document, BackendError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), BackendError>;
}
