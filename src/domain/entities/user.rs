use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// 認証プロバイダのuidをそのままidとして使う
    pub id: String,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: String, name: String, email: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            id,
            name,
            email,
            bio: String::new(),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
