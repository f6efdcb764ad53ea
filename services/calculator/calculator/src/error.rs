use std::borrow::Cow;

use log::error;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;

use telemetry::IsErr;

use crate::display::Rejection;

#[derive(Debug)]
pub enum ApiError {
    InternalError(String),
    InvalidExpression(Cow<'static, str>),
}

impl From<Rejection> for ApiError {
    fn from(r: Rejection) -> Self {
        match r {
            Rejection::Crashed => ApiError::InternalError("Evaluation panicked".to_string()),
            r => ApiError::InvalidExpression(r.message()),
        }
    }
}

impl IsErr for ApiError {
    fn is_err(&self) -> bool {
        matches!(self, ApiError::InternalError(_))
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    message: Cow<'a, str>,
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (message, status) = match self {
            ApiError::InternalError(e) => {
                error!("Internal Error: {}", e);
                (
                    Cow::Borrowed("Internal Server Error"),
                    Status::InternalServerError,
                )
            }
            ApiError::InvalidExpression(e) => (e, Status::BadRequest),
        };
        response::status::Custom(status, Json(ErrorResponse { message })).respond_to(req)
    }
}
