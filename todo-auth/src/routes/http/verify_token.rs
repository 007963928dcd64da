use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::{
    app_state::AppState, domain::CheckAuthResponse, errors::VerifyTokenError, utils::bearer_token,
};

/// Answers with the token the client must use from now on, which differs from
/// the presented one when it was rotated.
pub async fn check_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, VerifyTokenError> {
    let token = bearer_token(&headers).ok_or(VerifyTokenError::InvalidToken)?;
    let verified = state.auth_service.check_auth(token).await?;

    Ok((
        StatusCode::OK,
        Json(CheckAuthResponse {
            token: verified.token,
        }),
    ))
}
