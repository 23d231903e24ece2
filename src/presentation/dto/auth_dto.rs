use super::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Validate for SignUpRequest {
    fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("メールアドレスが必要です".to_string());
        }
        if self.password.is_empty() {
            return Err("パスワードが必要です".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("表示名が必要です".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl Validate for SignInRequest {
    fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("メールアドレスが必要です".to_string());
        }
        if self.password.is_empty() {
            return Err("パスワードが必要です".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionResponse {
    pub uid: String,
    pub email: String,
}
