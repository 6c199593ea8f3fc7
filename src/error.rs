use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid ID")]
    InvalidId,

    #[error("{0}")]
    BadRequest(String),

    #[error("Access Denied")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(e) = &self {
            tracing::error!(error = %e, "internal error");
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn response_status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn invalid_id_returns_400() {
        assert_eq!(response_status(ApiError::InvalidId), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_returns_401_with_access_denied() {
        let err = ApiError::Unauthorized;
        assert_eq!(err.to_string(), "Access Denied");
        assert_eq!(response_status(err), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn forbidden_returns_403() {
        assert_eq!(response_status(ApiError::Forbidden), StatusCode::FORBIDDEN);
    }

    #[test]
    fn not_found_names_the_collection() {
        let err = ApiError::NotFound("Food");
        assert_eq!(err.to_string(), "Food not found");
        assert_eq!(response_status(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_keeps_the_underlying_message() {
        let err = ApiError::from(anyhow::anyhow!("connection reset"));
        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(response_status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
