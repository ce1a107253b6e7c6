//! Validated JSON extractors
//!
//! JSON bodies are deserialized and then run through their `validator`
//! rules, so a handler receiving a request struct can rely on every
//! field-level constraint already holding.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::HeaderMap,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// JSON body that passed its `validator` rules
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Like `ValidatedJson`, but an empty body is `None`
///
/// Review endpoints take an optional note; clients that have nothing to
/// say POST with no body at all, which must not be a deserialization
/// error.
#[derive(Debug, Clone)]
pub struct OptionalValidatedJson<T>(pub Option<T>);

#[async_trait]
impl<S, T> FromRequest<S> for OptionalValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !declares_body(req.headers()) {
            return Ok(OptionalValidatedJson(None));
        }

        let ValidatedJson(value) = ValidatedJson::from_request(req, state).await?;
        Ok(OptionalValidatedJson(Some(value)))
    }
}

/// A request carries a body when it declares a non-zero content length
fn declares_body(headers: &HeaderMap) -> bool {
    headers
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok())
        .is_some_and(|len| len > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_LENGTH;

    #[test]
    fn test_missing_and_zero_content_length_mean_no_body() {
        let empty = HeaderMap::new();
        assert!(!declares_body(&empty));

        let mut zero = HeaderMap::new();
        zero.insert(CONTENT_LENGTH, "0".parse().unwrap());
        assert!(!declares_body(&zero));

        let mut some = HeaderMap::new();
        some.insert(CONTENT_LENGTH, "42".parse().unwrap());
        assert!(declares_body(&some));
    }

    #[test]
    fn test_unparseable_content_length_means_no_body() {
        let mut bad = HeaderMap::new();
        bad.insert(CONTENT_LENGTH, "many".parse().unwrap());
        assert!(!declares_body(&bad));
    }
}
