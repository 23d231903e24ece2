use crate::application::ports::document_store::BackendError;
use crate::application::ports::media_store::MediaStore;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// テストとデモ用のインメモリMediaStore。
/// アップロードされたバイト列をパスごとに保持し、memory://のURLを返す。
#[derive(Default)]
pub struct MemoryMedia {
    objects: Mutex<HashMap<String, (Bytes, String)>>,
}

impl MemoryMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stored(&self, path: &str) -> Option<(Bytes, String)> {
        let objects = self.objects.lock().await;
        objects.get(path).cloned()
    }
}

#[async_trait]
impl MediaStore for MemoryMedia {
    async fn upload(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, BackendError> {
        let mut objects = self.objects.lock().await;
        objects.insert(path.to_string(), (data, content_type.to_string()));
        Ok(format!("memory://{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_returns_retrievable_url() {
        let media = MemoryMedia::new();
        let url = media
            .upload("avatars/uid-1", Bytes::from_static(b"png"), "image/png")
            .await
            .unwrap();

        assert_eq!(url, "memory://avatars/uid-1");
        let (data, content_type) = media.stored("avatars/uid-1").await.unwrap();
        assert_eq!(data, Bytes::from_static(b"png"));
        assert_eq!(content_type, "image/png");
    }
}
