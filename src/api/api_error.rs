use crate::error::Error;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error returned by route handlers.
///
/// Client errors are answered with their own message. Everything else becomes a 500 whose
/// message is the outermost context attached by the handler; the full chain is only logged.
pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let any_err = self.0;
        let status = if let Some(rejection) = any_err.downcast_ref::<JsonRejection>() {
            match rejection {
                JsonRejection::JsonDataError(_) => StatusCode::UNPROCESSABLE_ENTITY,
                JsonRejection::JsonSyntaxError(_) => StatusCode::BAD_REQUEST,
                JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            match any_err.downcast_ref::<Error>() {
                Some(
                    Error::MissingField(_) | Error::InvalidField(_) | Error::IdMismatch { .. },
                ) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        };
        if status.is_server_error() {
            tracing::error!("{any_err:#}");
        } else {
            tracing::debug!("rejected request: {any_err}");
        }
        let body = Json(json!({
            "message": format!("{any_err}"),
        }));
        (status, body).into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
