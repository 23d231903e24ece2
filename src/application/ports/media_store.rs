use super::document_store::BackendError;
use async_trait::async_trait;
use bytes::Bytes;

/// オブジェクトストレージのブラックボックス境界。
/// 識別子を指定してアップロードし、取得可能なURLを受け取るだけ。
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, BackendError>;
}
