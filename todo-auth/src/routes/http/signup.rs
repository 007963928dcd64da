use axum::extract::State;
use axum::http::HeaderMap;
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::app_state::AppState;
use crate::domain::{Email, NewUser, Password, SignupRequestBody};
use crate::errors::{ActivationError, SignupError};
use crate::utils::bearer_token;
use crate::validation::is_valid_username;

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<SignupRequestBody>,
) -> Result<impl IntoResponse, SignupError> {
    if !is_valid_username(&request.username) {
        return Err(SignupError::InvalidUsername);
    }
    let email = Email::parse(request.email).or(Err(SignupError::InvalidEmail))?;
    let password = Password::parse(request.password).or(Err(SignupError::InvalidPassword))?;

    let user = state
        .auth_service
        .register(NewUser::new(
            request.username,
            request.first_name,
            request.last_name,
            email,
            password,
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn activate_account(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ActivationError> {
    let token = bearer_token(&headers).ok_or(ActivationError::InvalidToken)?;
    let user = state.auth_service.activate_account(token).await?;

    Ok((StatusCode::OK, Json(user)))
}
