//! Custom Axum extractors
//!
//! All reject with `ApiError`, so clients always get the envelope format
//! instead of axum's plain-text rejections.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{TaskId, ValidationError};

/// Task id from the `{id}` path segment.
///
/// A segment that is not a valid id cannot name an existing task, so it is
/// reported as not found.
pub struct TaskIdPath(pub TaskId);

impl<S> FromRequestParts<S> for TaskIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::task_not_found(""))?;

        let id = raw
            .parse::<TaskId>()
            .map_err(|_| ApiError::task_not_found(&raw))?;
        Ok(Self(id))
    }
}

/// JSON body whose rejection is a 400 envelope
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::Validation(ValidationError::MalformedBody {
                reason: rejection.body_text(),
            })),
        }
    }
}

/// JSON body where a missing body means `T::default()`.
///
/// A request without `Content-Type`, or with an empty (whitespace only)
/// body, yields the default value. Anything else must be valid JSON with a
/// JSON content type, and is rejected like [`ApiJson`] otherwise.
pub struct ApiJsonOrDefault<T>(pub T);

impl<T, S> FromRequest<S> for ApiJsonOrDefault<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !req.headers().contains_key(header::CONTENT_TYPE) {
            return Ok(Self(T::default()));
        }

        let is_json = json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| malformed(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        if !is_json {
            return Err(malformed(
                "Expected request with `Content-Type: application/json`".to_string(),
            ));
        }

        Json::<T>::from_bytes(&bytes)
            .map(|Json(value)| Self(value))
            .map_err(|rejection| malformed(rejection.body_text()))
    }
}

fn json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

fn malformed(reason: String) -> ApiError {
    ApiError::Validation(ValidationError::MalformedBody { reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        name: Option<String>,
    }

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<Sample, ApiError> {
        let mut builder = Request::builder().method("PUT").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let req = builder.body(Body::from(body)).unwrap();
        ApiJsonOrDefault::<Sample>::from_request(req, &())
            .await
            .map(|ApiJsonOrDefault(value)| value)
    }

    #[tokio::test]
    async fn missing_body_is_default() {
        assert_eq!(extract(None, "").await.unwrap(), Sample::default());
        assert_eq!(extract(Some("application/json"), "").await.unwrap(), Sample::default());
        assert_eq!(extract(Some("application/json"), " \n").await.unwrap(), Sample::default());
    }

    #[tokio::test]
    async fn json_body_is_parsed() {
        let value = extract(Some("application/json; charset=utf-8"), r#"{"name":"x"}"#)
            .await
            .unwrap();
        assert_eq!(value.name.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn bad_bodies_are_rejected() {
        assert!(matches!(
            extract(Some("application/json"), "{oops").await,
            Err(ApiError::Validation(ValidationError::MalformedBody { .. }))
        ));
        assert!(matches!(
            extract(Some("text/plain"), r#"{"name":"x"}"#).await,
            Err(ApiError::Validation(ValidationError::MalformedBody { .. }))
        ));
    }
}
