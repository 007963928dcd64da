use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::domain::{
    NewSession, SessionSearchQuery, SessionStoreError, TokenKind, TokenUpdateRequest,
};
use crate::errors::SessionApiError;
use crate::utils::bearer_token;

pub async fn create_session(
    State(state): State<AppState>,
    Json(new_session): Json<NewSession>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session = state.session_store.create(new_session).await?;

    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn search_session(
    State(state): State<AppState>,
    Query(query): Query<SessionSearchQuery>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session = state
        .session_store
        .find_by_token(&query.token, query.token_type)
        .await?;

    Ok((StatusCode::OK, Json(session)))
}

pub async fn my_sessions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, SessionApiError> {
    let token = bearer_token(&headers).ok_or(SessionApiError::InvalidToken)?;
    let response = state.auth_service.user_sessions(token).await?;

    Ok((StatusCode::OK, Json(response)))
}

pub async fn sessions_of_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, SessionApiError> {
    let sessions = state.session_store.list_by_user(user_id).await?;

    Ok((StatusCode::OK, Json(sessions)))
}

pub async fn update_session_token(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<TokenUpdateRequest>,
) -> Result<impl IntoResponse, SessionApiError> {
    let current = state
        .session_store
        .find_by_token(&request.old_access_token, TokenKind::Access)
        .await;

    match current {
        Ok(session) if session.session_id != session_id => {
            return Err(SessionApiError::BadRequest(
                "token belongs to another session".to_string(),
            ))
        }
        // A token that no longer resolves may still be the loser of a rotation
        Ok(_) | Err(SessionStoreError::NotFound) => {}
        Err(e) => return Err(e.into()),
    }

    let session = state
        .session_store
        .update_access_token(
            session_id,
            &request.old_access_token,
            &request.new_access_token,
        )
        .await?;

    Ok((StatusCode::OK, Json(session)))
}

pub async fn delete_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, SessionApiError> {
    let token = bearer_token(&headers).ok_or(SessionApiError::InvalidToken)?;
    let response = state
        .auth_service
        .revoke_session(token, session_id)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}
