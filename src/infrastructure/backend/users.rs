use super::mapper::{self, collections, fields};
use super::store_repository::StoreRepository;
use crate::application::ports::document_store::FieldOp;
use crate::application::ports::repositories::{ProfileUpdate, UserRepository};
use crate::domain::entities::User;
use crate::shared::AppError;
use async_trait::async_trait;
use serde_json::json;

#[async_trait]
impl UserRepository for StoreRepository {
    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let doc = self.store.get(collections::USERS, id).await?;
        match doc {
            Some(doc) => Ok(Some(mapper::map_user(&doc)?)),
            None => Ok(None),
        }
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.store
            .put(collections::USERS, mapper::user_document(user))
            .await?;
        Ok(())
    }

    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<User, AppError> {
        let mut ops = Vec::new();
        if let Some(name) = update.name {
            ops.push((fields::NAME.to_string(), FieldOp::Set(json!(name))));
        }
        if let Some(bio) = update.bio {
            ops.push((fields::BIO.to_string(), FieldOp::Set(json!(bio))));
        }
        if let Some(avatar_url) = update.avatar_url {
            ops.push((fields::AVATAR_URL.to_string(), FieldOp::Set(json!(avatar_url))));
        }
        ops.push((
            fields::UPDATED_AT.to_string(),
            FieldOp::Set(json!(chrono::Utc::now().timestamp_millis())),
        ));

        let doc = self.store.update(collections::USERS, id, ops).await?;
        Ok(mapper::map_user(&doc)?)
    }
}
