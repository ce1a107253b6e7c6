//! Authentication extractors
//!
//! Extracts and validates JWT tokens from the Authorization header,
//! with role-gated variants for the moderation and back-office surface.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use souq_core::{DomainError, Snowflake, UserRole};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the JWT token
    pub user_id: Snowflake,
    /// Role claim from the JWT token
    pub role: UserRole,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: Snowflake, role: UserRole) -> Self {
        Self { user_id, role }
    }
}

async fn authenticate<S>(parts: &mut Parts, state: &S) -> Result<AuthUser, ApiError>
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    // Extract the Authorization header
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::MissingAuth)?;

    // Get the app state to access JWT service
    let app_state = AppState::from_ref(state);

    // Validate the token
    let claims = app_state
        .jwt_service()
        .validate_token(bearer.token())
        .map_err(|e| {
            tracing::warn!(error = %e, "Invalid access token");
            ApiError::InvalidAuthFormat
        })?;

    // Extract user ID and role from claims
    let user_id = claims.user_id().map_err(|e| {
        tracing::warn!(error = %e, "Invalid user ID in token");
        ApiError::InvalidAuthFormat
    })?;
    let role = claims.user_role().map_err(|e| {
        tracing::warn!(error = %e, "Invalid role in token");
        ApiError::InvalidAuthFormat
    })?;

    Ok(AuthUser::new(user_id, role))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).await
    }
}

/// Authenticated user that must hold an admin or super-admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = authenticate(parts, state).await?;
        if !auth.role.is_admin() {
            return Err(ApiError::Domain(DomainError::AdminRequired));
        }
        Ok(AdminUser(auth))
    }
}

/// Authenticated user that must hold the super-admin role
#[derive(Debug, Clone)]
pub struct SuperAdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for SuperAdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = authenticate(parts, state).await?;
        if auth.role != UserRole::SuperAdmin {
            return Err(ApiError::Domain(DomainError::SuperAdminRequired));
        }
        Ok(SuperAdminUser(auth))
    }
}

/// Optional authenticated user
///
/// Returns None if no authorization header is present,
/// or an error if the token is invalid.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if parts.headers.get(axum::http::header::AUTHORIZATION).is_none() {
            return Ok(OptionalAuthUser(None));
        }

        let auth = authenticate(parts, state).await?;
        Ok(OptionalAuthUser(Some(auth)))
    }
}
