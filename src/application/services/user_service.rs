use crate::application::ports::media_store::MediaStore;
use crate::application::ports::repositories::{ProfileUpdate, UserRepository};
use crate::domain::entities::User;
use crate::shared::config::MediaConfig;
use crate::shared::AppError;
use bytes::Bytes;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<(Bytes, String)>,
}

/// プロフィールの読み書き。アバターはアップロードしてURLだけを持つ。
pub struct UserService {
    users: Arc<dyn UserRepository>,
    media: Arc<dyn MediaStore>,
    media_config: MediaConfig,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        media: Arc<dyn MediaStore>,
        media_config: MediaConfig,
    ) -> Self {
        Self {
            users,
            media,
            media_config,
        }
    }

    pub async fn get_profile(&self, id: &str) -> Result<User, AppError> {
        self.users
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {id}")))
    }

    pub async fn update_profile(
        &self,
        id: &str,
        input: UpdateProfileInput,
    ) -> Result<User, AppError> {
        if let Some(name) = &input.name {
            if name.trim().is_empty() {
                return Err(AppError::InvalidInput("表示名が空です".to_string()));
            }
        }

        let avatar_url = match input.avatar {
            Some((data, content_type)) => {
                if data.len() as u64 > self.media_config.max_upload_bytes {
                    return Err(AppError::InvalidInput(format!(
                        "画像が大きすぎます（最大{}バイト）",
                        self.media_config.max_upload_bytes
                    )));
                }
                let path = format!("avatars/{id}");
                Some(self.media.upload(&path, data, &content_type).await?)
            }
            None => None,
        };

        self.users
            .update_profile(
                id,
                ProfileUpdate {
                    name: input.name.map(|n| n.trim().to_string()),
                    bio: input.bio,
                    avatar_url,
                },
            )
            .await
    }
}
