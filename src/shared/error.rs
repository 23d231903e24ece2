use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Backend error ({code}): {message}")]
    Backend { code: String, message: String },

    #[error("Auth error ({code}): {message}")]
    Auth { code: String, message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn backend(code: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Backend {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn auth(code: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Auth {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            AppError::Backend { code, .. } => code,
            AppError::Auth { code, .. } => code,
            AppError::Storage(_) => "storage",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::NotFound(_) => "not_found",
            AppError::Serialization(_) => "serialization",
            AppError::Internal(_) => "internal",
        }
    }

    /// 既知のバックエンドエラーコードをユーザー向けメッセージへ変換する。
    /// 未知のコードは生のメッセージをそのまま返す。
    pub fn user_message(&self) -> String {
        match self {
            AppError::Backend { code, message } | AppError::Auth { code, message } => {
                match code.as_str() {
                    "permission-denied" => "この操作を行う権限がありません".to_string(),
                    "unavailable" => "サーバーに接続できません。時間をおいて再試行してください".to_string(),
                    "not-found" => "データが見つかりませんでした".to_string(),
                    "deadline-exceeded" => "リクエストがタイムアウトしました".to_string(),
                    "already-exists" => "同じデータが既に存在します".to_string(),
                    "email-already-in-use" => "このメールアドレスは既に使用されています".to_string(),
                    "invalid-email" => "メールアドレスの形式が正しくありません".to_string(),
                    "weak-password" => "パスワードが短すぎます（6文字以上）".to_string(),
                    "user-not-found" => "アカウントが見つかりません".to_string(),
                    "wrong-password" => "パスワードが正しくありません".to_string(),
                    _ => message.clone(),
                }
            }
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_code_is_passed_through() {
        let err = AppError::backend("permission-denied", "raw sdk message");
        assert_eq!(err.code(), "permission-denied");
    }

    #[test]
    fn known_codes_map_to_user_messages() {
        let err = AppError::backend("unavailable", "transport closed");
        assert_eq!(
            err.user_message(),
            "サーバーに接続できません。時間をおいて再試行してください"
        );

        let err = AppError::auth("wrong-password", "INVALID_LOGIN_CREDENTIALS");
        assert_eq!(err.user_message(), "パスワードが正しくありません");
    }

    #[test]
    fn unknown_code_falls_back_to_raw_message() {
        let err = AppError::backend("quota-exceeded", "daily quota exhausted");
        assert_eq!(err.user_message(), "daily quota exhausted");
    }

    #[test]
    fn non_backend_variants_use_display() {
        let err = AppError::NotFound("post missing".to_string());
        assert_eq!(err.user_message(), "Not found: post missing");
        assert_eq!(err.code(), "not_found");
    }
}
