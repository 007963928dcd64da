use axum::extract::State;
use axum::http::HeaderMap;
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::{
    app_state::AppState, domain::LogoutResponse, errors::LogoutError, utils::bearer_token,
};

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, LogoutError> {
    let token = bearer_token(&headers).ok_or(LogoutError::InvalidToken)?;

    // Unknown or already deleted sessions are still a successful logout
    let outcome = state.auth_service.logout(token).await?;

    Ok((
        StatusCode::OK,
        Json(LogoutResponse {
            message: outcome.message().to_string(),
        }),
    ))
}
