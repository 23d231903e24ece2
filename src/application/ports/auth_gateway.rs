use super::document_store::BackendError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
}

/// 認証プロバイダのブラックボックス境界。
/// 既知のエラーコード: email-already-in-use / invalid-email / weak-password /
/// user-not-found / wrong-password
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;

    async fn send_password_reset(&self, email: &str) -> Result<(), BackendError>;

    async fn current_user(&self) -> Option<AuthUser>;

    /// サインイン状態のストリーム。画面側はこれを監視する。
    fn watch_session(&self) -> watch::Receiver<Option<AuthUser>>;
}
