use crate::{auth, error::ApiError, model::AppState};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::header,
    response::IntoResponse,
};
use axum_macros::debug_handler;
use log::{debug, error};
use std::sync::Arc;

use super::SESSION_COOKIE;

#[derive(Debug, serde::Deserialize)]
pub struct Credentials {
    email: String,
    password: String,
}

#[debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(credentials) = body.map_err(|rejection| {
        debug!("Rejected login body: {}", rejection);
        ApiError::InvalidBody
    })?;

    debug!("Got login request for user: {}", credentials.email);

    // Don't hold the lock while hashing
    let user = {
        let db = state.database.lock().await;
        db.get_user_by_email(&credentials.email)?
    };

    // Unknown emails are checked against the decoy, so both
    // failures cost the same and get the same answer
    let stored = match &user {
        Some(user) => user.password.clone(),
        None => state.decoy_hash().to_string(),
    };
    let matches = auth::hash::check_password_blocking(credentials.password, stored)
        .await
        .map_err(|err| {
            error!("Password check did not finish: {}", err);
            ApiError::Internal
        })?;

    let user = match user {
        Some(user) if matches => user,
        Some(_) => {
            debug!("Password incorrect for user: {}", credentials.email);
            return Err(ApiError::InvalidCredentials);
        }
        None => {
            debug!("User not found: {}", credentials.email);
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = state.signer.sign(user.id)?;
    debug!("Logging in user {}", user.id);

    let cookie = make_cookie(&token, state.signer.ttl().as_secs());
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "ok": true })),
    ))
}

/// Clears the session cookie. Tokens aren't tracked server side, so
/// there is nothing else to revoke.
#[debug_handler]
pub async fn logout() -> impl IntoResponse {
    debug!("Clearing session cookie");
    (
        [(header::SET_COOKIE, make_cookie("", 0))],
        Json(serde_json::json!({ "ok": true })),
    )
}

fn make_cookie(token: &str, max_age: u64) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Strict",
        SESSION_COOKIE, token, max_age,
    )
}
