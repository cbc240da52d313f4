//! Middleware for modifying requests and responses.

use crate::infra::error::{ApiError, ClientError};
use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::Response,
};
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Body as _;
use tower_http::trace::MakeSpan;

static X_REQUEST_ID: &str = "x-request-id";

/// Creates a span per request, tagged with the request id.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MakeRequestIdSpan;

impl<B> MakeSpan<B> for MakeRequestIdSpan {
    fn make_span(&mut self, request: &http::Request<B>) -> tracing::Span {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|id| id.to_str().ok())
            .unwrap_or("unknown");
        tracing::info_span!(
            "request",
            request_id = request_id,
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}

/// The maximum size of a body to log.
const MAX_BODY_SIZE: u64 = 8192;

/// Log small request and response bodies at trace level.
pub(crate) async fn log_request_response(req: Request, next: Next) -> Result<Response, ApiError> {
    let (parts, body) = req.into_parts();
    let body = buffer_and_print("Request", body).await?;
    let req = Request::from_parts(parts, body);

    let res = next.run(req).await;

    let (parts, body) = res.into_parts();
    let body = buffer_and_print("Response", body).await?;
    Ok(Response::from_parts(parts, body))
}

/// Read a body into memory and log it, unless it is too large or of unknown size.
async fn buffer_and_print(direction: &str, body: Body) -> Result<Body, ApiError> {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return Ok(body);
    }
    match body.size_hint().upper() {
        Some(n) if n <= MAX_BODY_SIZE => {}
        _ => return Ok(body),
    }

    let bytes: Bytes = body
        .collect()
        .await
        .map_err(|e| ClientError::BadRequest(format!("failed to read body: {e}")))?
        .to_bytes();

    if let Ok(text) = std::str::from_utf8(&bytes) {
        tracing::trace!("{} body = {:?}", direction, text);
    }

    Ok(Body::from(bytes))
}
