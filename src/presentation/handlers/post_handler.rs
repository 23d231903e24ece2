use crate::application::services::PostService;
use crate::domain::entities::User;
use crate::presentation::dto::{
    post_dto::{CreatePostRequest, PostActionRequest, PostResponse},
    ApiResponse, Validate,
};
use crate::shared::AppError;
use bytes::Bytes;
use std::sync::Arc;

pub struct PostHandler {
    post_service: Arc<PostService>,
}

impl PostHandler {
    pub fn new(post_service: Arc<PostService>) -> Self {
        Self { post_service }
    }

    pub async fn create_post(
        &self,
        author: &User,
        request: CreatePostRequest,
        image: Option<(Bytes, String)>,
    ) -> ApiResponse<PostResponse> {
        // 入力検証
        if let Err(e) = request.validate() {
            return ApiResponse::from_app_error(AppError::InvalidInput(e));
        }

        let result = self
            .post_service
            .create_post(author, &request.topic_name, &request.content, image)
            .await
            .map(|post| PostResponse::from_post(&post, Some(author.id.as_str())));
        ApiResponse::from_result(result)
    }

    pub async fn delete_post(&self, request: PostActionRequest) -> ApiResponse<()> {
        if let Err(e) = request.validate() {
            return ApiResponse::from_app_error(AppError::InvalidInput(e));
        }

        let result = self
            .post_service
            .delete_post(&request.post_id, &request.user_id)
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn toggle_like(&self, request: PostActionRequest) -> ApiResponse<PostResponse> {
        if let Err(e) = request.validate() {
            return ApiResponse::from_app_error(AppError::InvalidInput(e));
        }

        let result = self
            .post_service
            .toggle_like(&request.post_id, &request.user_id)
            .await
            .map(|post| PostResponse::from_post(&post, Some(request.user_id.as_str())));
        ApiResponse::from_result(result)
    }

    pub async fn toggle_bookmark(&self, request: PostActionRequest) -> ApiResponse<PostResponse> {
        if let Err(e) = request.validate() {
            return ApiResponse::from_app_error(AppError::InvalidInput(e));
        }

        let result = self
            .post_service
            .toggle_bookmark(&request.post_id, &request.user_id)
            .await
            .map(|post| PostResponse::from_post(&post, Some(request.user_id.as_str())));
        ApiResponse::from_result(result)
    }
}
