use super::Validate;
use crate::domain::entities::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub created_at: i64,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: user.created_at.timestamp_millis(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("表示名が空です".to_string());
            }
        }
        if self.name.is_none() && self.bio.is_none() {
            return Err("更新する項目がありません".to_string());
        }
        Ok(())
    }
}
