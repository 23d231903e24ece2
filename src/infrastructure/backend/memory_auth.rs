use crate::application::ports::auth_gateway::{AuthGateway, AuthUser};
use crate::application::ports::document_store::BackendError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{watch, Mutex};

struct Account {
    uid: String,
    password: String,
}

/// テストとデモ用のインメモリAuthGateway。
/// 本物のプロバイダと同じエラーコードを返す。
pub struct MemoryAuth {
    accounts: Mutex<HashMap<String, Account>>,
    session_tx: watch::Sender<Option<AuthUser>>,
}

impl Default for MemoryAuth {
    fn default() -> Self {
        let (session_tx, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            session_tx,
        }
    }
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthGateway for MemoryAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        if !email.contains('@') {
            return Err(BackendError::new("invalid-email", "malformed email address"));
        }
        if password.len() < 6 {
            return Err(BackendError::new(
                "weak-password",
                "password must be at least 6 characters",
            ));
        }

        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(email) {
            return Err(BackendError::new(
                "email-already-in-use",
                "an account with this email already exists",
            ));
        }

        let uid = uuid::Uuid::new_v4().to_string();
        accounts.insert(
            email.to_string(),
            Account {
                uid: uid.clone(),
                password: password.to_string(),
            },
        );

        let user = AuthUser {
            uid,
            email: email.to_string(),
        };
        let _ = self.session_tx.send(Some(user.clone()));
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let accounts = self.accounts.lock().await;
        let account = accounts
            .get(email)
            .ok_or_else(|| BackendError::new("user-not-found", "no account for this email"))?;
        if account.password != password {
            return Err(BackendError::new("wrong-password", "credentials rejected"));
        }

        let user = AuthUser {
            uid: account.uid.clone(),
            email: email.to_string(),
        };
        let _ = self.session_tx.send(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let _ = self.session_tx.send(None);
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), BackendError> {
        let accounts = self.accounts.lock().await;
        if !accounts.contains_key(email) {
            return Err(BackendError::new("user-not-found", "no account for this email"));
        }
        Ok(())
    }

    async fn current_user(&self) -> Option<AuthUser> {
        self.session_tx.borrow().clone()
    }

    fn watch_session(&self) -> watch::Receiver<Option<AuthUser>> {
        self.session_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_then_sign_in_round_trip() {
        let auth = MemoryAuth::new();
        let created = auth.sign_up("alice@example.com", "secret1").await.unwrap();
        assert_eq!(auth.current_user().await, Some(created.clone()));

        auth.sign_out().await.unwrap();
        assert!(auth.current_user().await.is_none());

        let signed_in = auth.sign_in("alice@example.com", "secret1").await.unwrap();
        assert_eq!(signed_in.uid, created.uid);
    }

    #[tokio::test]
    async fn known_error_codes_are_emitted() {
        let auth = MemoryAuth::new();

        let err = auth.sign_up("not-an-email", "secret1").await.unwrap_err();
        assert_eq!(err.code, "invalid-email");

        let err = auth.sign_up("bob@example.com", "123").await.unwrap_err();
        assert_eq!(err.code, "weak-password");

        auth.sign_up("bob@example.com", "secret1").await.unwrap();
        let err = auth.sign_up("bob@example.com", "secret2").await.unwrap_err();
        assert_eq!(err.code, "email-already-in-use");

        let err = auth.sign_in("carol@example.com", "secret1").await.unwrap_err();
        assert_eq!(err.code, "user-not-found");

        let err = auth.sign_in("bob@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.code, "wrong-password");

        let err = auth.send_password_reset("carol@example.com").await.unwrap_err();
        assert_eq!(err.code, "user-not-found");
    }

    #[tokio::test]
    async fn session_stream_tracks_sign_in_state() {
        let auth = MemoryAuth::new();
        let mut session = auth.watch_session();
        assert!(session.borrow().is_none());

        auth.sign_up("alice@example.com", "secret1").await.unwrap();
        session.changed().await.unwrap();
        assert!(session.borrow().is_some());

        auth.sign_out().await.unwrap();
        session.changed().await.unwrap();
        assert!(session.borrow().is_none());
    }
}
