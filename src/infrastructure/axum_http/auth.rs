use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::Response,
};

use crate::{
    domain::value_objects::iam::CallerId,
    infrastructure::axum_http::error_responses::error_response,
};

/// Set by the upstream gateway once the caller's token has been verified.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: CallerId,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                error_response(StatusCode::UNAUTHORIZED, "missing X-User-Id header")
            })?;

        Ok(AuthUser {
            user_id: CallerId::new(user_id),
        })
    }
}
