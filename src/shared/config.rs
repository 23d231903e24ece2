use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub feed: FeedConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub project_id: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// 初回フェッチの取得件数
    pub initial_limit: usize,
    /// 追加ロードごとに増やす件数
    pub page_step: usize,
    /// リスト末尾から何件手前で追加ロードを発火するか
    pub load_more_threshold: usize,
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    pub max_upload_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                project_id: "saezuri".to_string(),
                timeout_secs: 30,
            },
            feed: FeedConfig::default(),
            media: MediaConfig {
                max_upload_bytes: 5 * 1024 * 1024, // 5MB
            },
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_limit: 10,
            page_step: 5,
            load_more_threshold: 3,
            debounce_ms: 500,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SAEZURI_PROJECT_ID") {
            if !v.trim().is_empty() {
                cfg.backend.project_id = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("SAEZURI_BACKEND_TIMEOUT_SECS") {
            if let Some(value) = parse_u64(&v) {
                cfg.backend.timeout_secs = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("SAEZURI_FEED_INITIAL_LIMIT") {
            if let Some(value) = parse_usize(&v) {
                cfg.feed.initial_limit = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("SAEZURI_FEED_PAGE_STEP") {
            if let Some(value) = parse_usize(&v) {
                cfg.feed.page_step = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("SAEZURI_FEED_LOAD_MORE_THRESHOLD") {
            if let Some(value) = parse_usize(&v) {
                cfg.feed.load_more_threshold = value;
            }
        }
        if let Ok(v) = std::env::var("SAEZURI_FEED_DEBOUNCE_MS") {
            if let Some(value) = parse_u64(&v) {
                cfg.feed.debounce_ms = value;
            }
        }
        if let Ok(v) = std::env::var("SAEZURI_MEDIA_MAX_UPLOAD_BYTES") {
            if let Some(value) = parse_u64(&v) {
                cfg.media.max_upload_bytes = value.max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.backend.project_id.trim().is_empty() {
            return Err("Backend project_id must not be empty".to_string());
        }
        if self.backend.timeout_secs == 0 {
            return Err("Backend timeout_secs must be greater than 0".to_string());
        }
        if self.feed.initial_limit == 0 {
            return Err("Feed initial_limit must be greater than 0".to_string());
        }
        if self.feed.page_step == 0 {
            return Err("Feed page_step must be greater than 0".to_string());
        }
        if self.media.max_upload_bytes == 0 {
            return Err("Media max_upload_bytes must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.feed.initial_limit, 10);
        assert_eq!(cfg.feed.page_step, 5);
        assert_eq!(cfg.feed.load_more_threshold, 3);
        assert_eq!(cfg.feed.debounce_ms, 500);
    }

    #[test]
    fn env_overrides_apply() {
        std::env::set_var("SAEZURI_FEED_INITIAL_LIMIT", "4");
        std::env::set_var("SAEZURI_FEED_PAGE_STEP", "2");
        std::env::set_var("SAEZURI_FEED_DEBOUNCE_MS", "100");

        let cfg = AppConfig::from_env();
        assert_eq!(cfg.feed.initial_limit, 4);
        assert_eq!(cfg.feed.page_step, 2);
        assert_eq!(cfg.feed.debounce_ms, 100);

        std::env::remove_var("SAEZURI_FEED_INITIAL_LIMIT");
        std::env::remove_var("SAEZURI_FEED_PAGE_STEP");
        std::env::remove_var("SAEZURI_FEED_DEBOUNCE_MS");
    }

    #[test]
    fn zero_page_step_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.feed.page_step = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn garbage_env_values_keep_defaults() {
        std::env::set_var("SAEZURI_MEDIA_MAX_UPLOAD_BYTES", "lots");
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.media.max_upload_bytes, 5 * 1024 * 1024);
        std::env::remove_var("SAEZURI_MEDIA_MAX_UPLOAD_BYTES");
    }
}
