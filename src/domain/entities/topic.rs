use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topic {
    /// 正規化した小文字のトピック名がidを兼ねる
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub post_count: u32,
    pub last_posted_at: Option<i64>,
    pub created_at: i64,
}

impl Topic {
    pub fn new(name: &str) -> Self {
        let name = name.trim().to_string();
        Self {
            id: Self::normalize_id(&name),
            name,
            description: None,
            post_count: 0,
            last_posted_at: None,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// トピック名からidを導出する。空白はハイフンに寄せる。
    pub fn normalize_id(name: &str) -> String {
        name.trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}
