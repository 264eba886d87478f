use axum::extract::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use talent_core::auth::AuthError;
use talent_core::control::ControlError;
use talent_core::store::StoreError;
use tracing::error;

const INTERNAL_ERROR_MESSAGE: &str = "internal error";

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn timeout() -> Self {
        Self {
            status: StatusCode::REQUEST_TIMEOUT,
            message: "request timed out".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Disabled(_) => Self::forbidden(err.to_string()),
            AuthError::InvalidSecret | AuthError::Hashing(_) => {
                error!("auth failure: {err}");
                Self::internal(INTERNAL_ERROR_MESSAGE)
            }
            AuthError::MissingCredential
            | AuthError::MalformedToken
            | AuthError::BadSignature
            | AuthError::Expired
            | AuthError::InvalidCredentials => Self::unauthorized(err.to_string()),
        }
    }
}

impl From<ControlError> for ApiError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::Store(StoreError::InvalidInput(message)) => Self::bad_request(message),
            ControlError::Store(StoreError::Conflict(message)) => Self::conflict(message),
            ControlError::Store(StoreError::Surreal(err)) => {
                error!("store failure: {err}");
                Self::internal(INTERNAL_ERROR_MESSAGE)
            }
            ControlError::Auth(err) => Self::from(err),
            ControlError::Report(message) => {
                error!("report failure: {message}");
                Self::internal(INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        let payload = Json(ErrorResponse { error: self.message });
        let mut response = (status, payload).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
