use axum::{
    extract::{FromRef, State},
    http::{header, HeaderName},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use super::{
    cookie::{clear_token_cookie, token_cookie},
    dto::{SessionUser, TokenRequest, TokenResponse},
    extractors::AuthUser,
    jwt::JwtKeys,
};
use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    state::AppState,
};

type WithCookie<T> = ([(HeaderName, String); 1], Json<T>);

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", post(logout))
        .route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn issue_token(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TokenRequest>,
) -> ApiResult<WithCookie<TokenResponse>> {
    let email = payload.email.trim().to_string();
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let name = payload.name.filter(|n| !n.trim().is_empty());
    let token = keys.sign(&email, name)?;

    info!(email = %email, "session issued");
    let cookie = token_cookie(&token, keys.ttl_secs(), state.config.cookie.secure);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(TokenResponse { success: true }),
    ))
}

#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> WithCookie<TokenResponse> {
    (
        [(header::SET_COOKIE, clear_token_cookie(state.config.cookie.secure))],
        Json(TokenResponse { success: true }),
    )
}

#[instrument(skip_all, fields(email = %user.email))]
pub async fn get_me(user: AuthUser) -> Json<SessionUser> {
    Json(SessionUser {
        email: user.email,
        name: user.name,
    })
}
