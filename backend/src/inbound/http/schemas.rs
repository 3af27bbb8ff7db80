//! OpenAPI schema for the error envelope returned by every handler.

use utoipa::ToSchema;

/// Machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// The contact email is already used by another contact.
    #[schema(rename = "conflict")]
    Conflict,
    /// The contact store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error envelope: `{"code", "message", "traceId", "details"}`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "only read by utoipa when building the document")]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "Contact not found")]
    message: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Offending field and reason, e.g. `{"field": "email", "code": "invalid_email"}`.
    details: Option<serde_json::Value>,
}
