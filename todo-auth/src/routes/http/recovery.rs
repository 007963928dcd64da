use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::app_state::AppState;
use crate::domain::{MessageResponse, Password, PasswordForm};
use crate::errors::RecoveryError;
use crate::utils::bearer_token;

pub async fn get_forgot_password_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, RecoveryError> {
    state.auth_service.request_password_recovery(&email).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Recovery email sent".to_string(),
        }),
    ))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<PasswordForm>,
) -> Result<impl IntoResponse, RecoveryError> {
    let token = bearer_token(&headers).ok_or(RecoveryError::InvalidToken)?;
    let password = Password::parse(form.password).or(Err(RecoveryError::InvalidPassword))?;

    let user = state.auth_service.reset_password(token, password).await?;

    Ok((StatusCode::OK, Json(user)))
}
