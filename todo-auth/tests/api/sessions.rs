use serde_json::json;

use todo_auth::domain::{AuthResponse, Session, TokenResponse};

use crate::common::PASSWORD;
use crate::helpers::TestApp;

async fn create(app: &TestApp, body: serde_json::Value) -> reqwest::Response {
    app.http_client
        .post(format!("{}/session/crud", &app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute session create request.")
}

async fn update_token(app: &TestApp, session_id: &str, old: &str, new: &str) -> reqwest::Response {
    app.http_client
        .patch(format!(
            "{}/session/crud/{}/update_token",
            &app.address, session_id
        ))
        .json(&json!({ "old_access_token": old, "new_access_token": new }))
        .send()
        .await
        .expect("Failed to execute token update request.")
}

#[tokio::test]
async fn should_create_and_search_sessions() {
    let app = TestApp::new().await;

    let response = create(
        &app,
        json!({ "user_id": 42, "access_token": "a-1", "refresh_token": "r-1", "device": "" }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 201);
    let session = response.json::<Session>().await.unwrap();
    assert_eq!(session.device, "unknown");
    assert_eq!(session.ip_address, "unknown");

    let response = app
        .http_client
        .get(format!("{}/session/crud/search", &app.address))
        .query(&[("token", "r-1"), ("token_type", "refresh_token")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.json::<Session>().await.unwrap().session_id,
        session.session_id
    );

    let response = app
        .http_client
        .get(format!("{}/session/crud/search", &app.address))
        .query(&[("token", "a-1")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = app
        .http_client
        .get(format!("{}/session/crud/search", &app.address))
        .query(&[("token", "nope")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = app
        .http_client
        .get(format!("{}/session/crud/user/42", &app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Vec<Session>>().await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_return_400_for_blank_access_token() {
    let app = TestApp::new().await;

    let response = create(&app, json!({ "user_id": 42, "access_token": " " })).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn should_return_400_for_out_of_range_expiry() {
    let app = TestApp::new().await;

    let response = create(
        &app,
        json!({ "user_id": 42, "access_token": "a", "expires_in": i64::MAX }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = create(&app, json!({ "user_id": 42, "access_token": "a", "expires_in": 0 })).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn token_update_is_compare_and_swap() {
    let app = TestApp::new().await;
    let session = create(&app, json!({ "user_id": 7, "access_token": "t-0" }))
        .await
        .json::<Session>()
        .await
        .unwrap();
    let other = create(&app, json!({ "user_id": 7, "access_token": "u-0" }))
        .await
        .json::<Session>()
        .await
        .unwrap();
    let id = session.session_id.to_string();

    let response = update_token(&app, &id, "t-0", "t-1").await;
    assert_eq!(response.status().as_u16(), 200);
    let updated = response.json::<Session>().await.unwrap();
    assert_eq!(updated.access_token, "t-1");
    assert_eq!(updated.expires_at, session.expires_at);

    // the loser of a rotation race
    let response = update_token(&app, &id, "t-0", "t-2").await;
    assert_eq!(response.status().as_u16(), 409);

    let response = update_token(&app, &id, "u-0", "t-3").await;
    assert_eq!(response.status().as_u16(), 400);

    let response = update_token(&app, &uuid::Uuid::new_v4().to_string(), "x", "y").await;
    assert_eq!(response.status().as_u16(), 404);

    assert_eq!(other.access_token, "u-0");
}

#[tokio::test]
async fn should_list_and_revoke_own_sessions() {
    let app = TestApp::new().await;
    let (_, first) = app.logged_in_user(false).await;
    let (_, stranger) = app.logged_in_user(false).await;

    let response = app.my_sessions(&first.access_token).await;
    assert_eq!(response.status().as_u16(), 200);
    let listed = response.json::<AuthResponse<Vec<Session>>>().await.unwrap();
    assert_eq!(listed.data.len(), 1);
    assert_eq!(listed.data[0].session_id, first.session_id);
    assert_eq!(listed.token, first.access_token);

    let response = app
        .delete_session(&first.access_token, &stranger.session_id.to_string())
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app
        .delete_session(&first.access_token, &first.session_id.to_string())
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let revoked = response.json::<AuthResponse<Session>>().await.unwrap();
    assert_eq!(revoked.data.session_id, first.session_id);

    let response = app.my_sessions(&first.access_token).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_sweep_expired_sessions_before_listing() {
    let app = TestApp::new().await;
    let (user, current) = app.logged_in_user(false).await;
    let stale = app
        .login(&user.username, PASSWORD, false)
        .await
        .json::<TokenResponse>()
        .await
        .unwrap();
    app.store.evict(stale.session_id).await;

    let listed = app
        .my_sessions(&current.access_token)
        .await
        .json::<AuthResponse<Vec<Session>>>()
        .await
        .unwrap();
    assert_eq!(listed.data.len(), 1);
    assert_eq!(listed.data[0].session_id, current.session_id);
}
