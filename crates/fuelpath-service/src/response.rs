//! Handler replies: a JSON payload or an RFC 9457 problem, tagged with the
//! request ID in the `x-request-id` response header.

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{ProblemDetails, RequestId, REQUEST_ID_HEADER};

/// Outcome of a request-scoped handler.
#[derive(Debug)]
pub enum ApiResponse<T> {
    /// `200 OK` with `body` serialized as JSON.
    Ok { body: T, request_id: RequestId },
    /// Error reply; the request ID is taken from the problem's `instance`.
    Problem(ProblemDetails),
}

impl<T> ApiResponse<T> {
    pub fn ok(body: T, request_id: RequestId) -> Self {
        Self::Ok { body, request_id }
    }
}

impl<T> From<ProblemDetails> for ApiResponse<T> {
    fn from(problem: ProblemDetails) -> Self {
        Self::Problem(problem)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let (mut response, request_id) = match self {
            Self::Ok { body, request_id } => {
                ((StatusCode::OK, Json(body)).into_response(), Some(request_id.0))
            }
            Self::Problem(problem) => {
                let instance = problem.instance.clone();
                (problem.into_response(), instance)
            }
        };

        if let Some(value) = request_id.and_then(|id| HeaderValue::from_str(&id).ok()) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        response
    }
}
