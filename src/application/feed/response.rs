use crate::shared::AppError;

/// リポジトリと画面ステートホルダー間のワイヤ契約。
#[derive(Debug, Clone)]
pub enum Response<T> {
    Loading,
    Success(T),
    Failure(AppError),
}

impl<T> Response<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        match self {
            Response::Loading => Response::Loading,
            Response::Success(data) => Response::Success(f(data)),
            Response::Failure(err) => Response::Failure(err),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Response::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Response::Failure(_))
    }
}
