use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::app_state::AppState;
use crate::domain::LoginRequestBody;
use crate::errors::LoginError;

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequestBody>,
) -> Result<impl IntoResponse, LoginError> {
    if request.identifier.trim().is_empty() || request.password.is_empty() {
        return Err(LoginError::InvalidCredentials);
    }

    let tokens = state.auth_service.login(request).await?;

    Ok((StatusCode::OK, Json(tokens)))
}
