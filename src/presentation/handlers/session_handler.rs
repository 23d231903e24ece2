use crate::application::services::SessionService;
use crate::presentation::dto::{
    auth_dto::{SessionResponse, SignInRequest, SignUpRequest},
    user_dto::UserResponse,
    ApiResponse, Validate,
};
use crate::shared::AppError;
use std::sync::Arc;

pub struct SessionHandler {
    session_service: Arc<SessionService>,
}

impl SessionHandler {
    pub fn new(session_service: Arc<SessionService>) -> Self {
        Self { session_service }
    }

    pub async fn sign_up(&self, request: SignUpRequest) -> ApiResponse<UserResponse> {
        // 入力検証
        if let Err(e) = request.validate() {
            return ApiResponse::from_app_error(AppError::InvalidInput(e));
        }

        let result = self
            .session_service
            .sign_up(&request.email, &request.password, &request.name)
            .await
            .map(|user| UserResponse::from(&user));
        ApiResponse::from_result(result)
    }

    pub async fn sign_in(&self, request: SignInRequest) -> ApiResponse<SessionResponse> {
        if let Err(e) = request.validate() {
            return ApiResponse::from_app_error(AppError::InvalidInput(e));
        }

        let result = self
            .session_service
            .sign_in(&request.email, &request.password)
            .await
            .map(|user| SessionResponse {
                uid: user.uid,
                email: user.email,
            });
        ApiResponse::from_result(result)
    }

    pub async fn sign_out(&self) -> ApiResponse<()> {
        ApiResponse::from_result(self.session_service.sign_out().await)
    }

    pub async fn send_password_reset(&self, email: &str) -> ApiResponse<()> {
        if email.trim().is_empty() {
            return ApiResponse::from_app_error(AppError::InvalidInput(
                "メールアドレスが必要です".to_string(),
            ));
        }
        ApiResponse::from_result(self.session_service.send_password_reset(email).await)
    }

    pub async fn current_session(&self) -> ApiResponse<Option<SessionResponse>> {
        let session = self
            .session_service
            .current_user()
            .await
            .map(|user| SessionResponse {
                uid: user.uid,
                email: user.email,
            });
        ApiResponse::success(session)
    }
}
