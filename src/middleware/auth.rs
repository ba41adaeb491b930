use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{Claims, TokenService};
use crate::error::ApiError;

/// Authenticated identity extracted from a verified bearer token, injected
/// into the request extensions for downstream handlers.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.id }
    }
}

/// Gate for protected routes: requires `Authorization: Bearer <token>`,
/// verifies the token and attaches the resolved [`AuthUser`].
///
/// The store is deliberately not consulted here; a correctly signed,
/// unexpired token passes even if the user row has since vanished, and the
/// handler that fails to find the row answers with its own 404.
pub async fn require_auth(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credential = extract_bearer(request.headers())?;

    let claims = tokens
        .verify(&credential)
        .map_err(|_| ApiError::unauthenticated("Invalid token"))?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Pull the credential out of the Authorization header.
///
/// Absent or empty header and malformed scheme are distinguishable to the
/// client; everything about the credential itself is not.
fn extract_bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthenticated("No token provided"))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::unauthenticated("Invalid token format"))?;

    if value.is_empty() {
        return Err(ApiError::unauthenticated("No token provided"));
    }

    // Exactly `Bearer <credential>`, scheme case-sensitive
    let mut parts = value.splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let credential = parts.next().unwrap_or_default();

    if scheme != "Bearer" || credential.is_empty() {
        return Err(ApiError::unauthenticated("Invalid token format"));
    }

    Ok(credential.to_string())
}
