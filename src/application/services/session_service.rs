use crate::application::ports::auth_gateway::{AuthGateway, AuthUser};
use crate::application::ports::document_store::BackendError;
use crate::application::ports::repositories::UserRepository;
use crate::domain::entities::User;
use crate::shared::AppError;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

fn auth_error(err: BackendError) -> AppError {
    AppError::Auth {
        code: err.code,
        message: err.message,
    }
}

/// 認証プロバイダへの薄いパススルー。トークンやフォームは扱わない。
pub struct SessionService {
    auth: Arc<dyn AuthGateway>,
    users: Arc<dyn UserRepository>,
}

impl SessionService {
    pub fn new(auth: Arc<dyn AuthGateway>, users: Arc<dyn UserRepository>) -> Self {
        Self { auth, users }
    }

    /// サインアップに成功したら初期ユーザードキュメントも書く
    pub async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<User, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidInput("表示名が必要です".to_string()));
        }

        let auth_user = self
            .auth
            .sign_up(email, password)
            .await
            .map_err(auth_error)?;

        let user = User::new(
            auth_user.uid,
            name.trim().to_string(),
            auth_user.email,
        );
        self.users.upsert_user(&user).await?;

        info!(user_id = %user.id, "account created");
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        self.auth.sign_in(email, password).await.map_err(auth_error)
    }

    pub async fn sign_out(&self) -> Result<(), AppError> {
        self.auth.sign_out().await.map_err(auth_error)
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<(), AppError> {
        self.auth
            .send_password_reset(email)
            .await
            .map_err(auth_error)
    }

    pub async fn current_user(&self) -> Option<AuthUser> {
        self.auth.current_user().await
    }

    pub fn watch_session(&self) -> watch::Receiver<Option<AuthUser>> {
        self.auth.watch_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::repositories::UserRepository;
    use crate::infrastructure::backend::{MemoryAuth, MemoryStore, StoreRepository};

    fn setup() -> (SessionService, Arc<StoreRepository>) {
        let repository = Arc::new(StoreRepository::new(Arc::new(MemoryStore::new())));
        let service = SessionService::new(
            Arc::new(MemoryAuth::new()),
            Arc::clone(&repository) as Arc<dyn UserRepository>,
        );
        (service, repository)
    }

    #[tokio::test]
    async fn sign_up_writes_initial_user_document() {
        let (service, repository) = setup();

        let user = service
            .sign_up("alice@example.com", "secret1", "  Alice  ")
            .await
            .expect("sign up");

        assert_eq!(user.name, "Alice");
        let stored = repository.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "alice@example.com");
        assert!(service.current_user().await.is_some());
    }

    #[tokio::test]
    async fn sign_up_requires_display_name() {
        let (service, _repository) = setup();
        let err = service
            .sign_up("alice@example.com", "secret1", "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn auth_failures_map_to_auth_errors_with_user_messages() {
        let (service, _repository) = setup();
        service
            .sign_up("alice@example.com", "secret1", "Alice")
            .await
            .unwrap();

        let err = service
            .sign_in("alice@example.com", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "wrong-password");
        assert_eq!(err.user_message(), "パスワードが正しくありません");

        let err = service
            .send_password_reset("ghost@example.com")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "user-not-found");
    }

    #[tokio::test]
    async fn sign_out_clears_session_stream() {
        let (service, _repository) = setup();
        let mut session = service.watch_session();

        service
            .sign_up("alice@example.com", "secret1", "Alice")
            .await
            .unwrap();
        session.changed().await.unwrap();
        assert!(session.borrow().is_some());

        service.sign_out().await.unwrap();
        session.changed().await.unwrap();
        assert!(session.borrow().is_none());
    }
}
