use crate::application::services::{UpdateProfileInput, UserService};
use crate::presentation::dto::{
    user_dto::{UpdateProfileRequest, UserResponse},
    ApiResponse, Validate,
};
use crate::shared::AppError;
use bytes::Bytes;
use std::sync::Arc;

pub struct UserHandler {
    user_service: Arc<UserService>,
}

impl UserHandler {
    pub fn new(user_service: Arc<UserService>) -> Self {
        Self { user_service }
    }

    pub async fn get_profile(&self, user_id: &str) -> ApiResponse<UserResponse> {
        let result = self
            .user_service
            .get_profile(user_id)
            .await
            .map(|user| UserResponse::from(&user));
        ApiResponse::from_result(result)
    }

    /// アバターはバイナリなのでリクエストDTOとは別引数で受ける
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
        avatar: Option<(Bytes, String)>,
    ) -> ApiResponse<UserResponse> {
        // 入力検証
        if avatar.is_none() {
            if let Err(e) = request.validate() {
                return ApiResponse::from_app_error(AppError::InvalidInput(e));
            }
        }

        let result = self
            .user_service
            .update_profile(
                user_id,
                UpdateProfileInput {
                    name: request.name,
                    bio: request.bio,
                    avatar,
                },
            )
            .await
            .map(|user| UserResponse::from(&user));
        ApiResponse::from_result(result)
    }
}
