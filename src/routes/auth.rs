use axum::{
    extract::{State, TypedHeader},
    headers::Cookie,
    http::Request,
    middleware::Next,
    response::Response,
};
use log::{debug, trace};
use std::sync::Arc;

use crate::{
    error::ApiError,
    model::{AppState, Session},
};

pub const SESSION_COOKIE: &str = "auth_token";

/// Rejects the request unless it carries a valid session cookie.
/// On success the decoded [`Session`] is put in the request extensions.
pub async fn authenticate<B>(
    State(state): State<Arc<AppState>>,
    cookies: Option<TypedHeader<Cookie>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, ApiError> {
    // Get token out of cookies
    let Some(token) = cookies
        .as_ref()
        .and_then(|TypedHeader(cookies)| cookies.get(SESSION_COOKIE))
    else {
        trace!("No session cookie found");
        return Err(ApiError::Unauthorized);
    };

    let claims = state.signer.verify(token).map_err(|err| {
        debug!("{}", err);
        ApiError::Unauthorized
    })?;

    let session = Session::try_from(claims).map_err(|err| {
        debug!("Session token has a malformed subject: {}", err);
        ApiError::Unauthorized
    })?;

    trace!("Request authenticated as user {}", session.user_id);
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
