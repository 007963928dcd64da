use todo_auth::domain::{EmailKind, SessionStore, TokenResponse};

use crate::common::{random_username, PASSWORD};
use crate::helpers::TestApp;

#[tokio::test]
async fn should_return_200_with_tokens() {
    let app = TestApp::new().await;
    let (user, _) = app.logged_in_user(false).await;

    let response = app.login(&user.email, PASSWORD, true).await;
    assert_eq!(response.status().as_u16(), 200);

    let tokens = response
        .json::<TokenResponse>()
        .await
        .expect("Could not deserialize response body to TokenResponse");
    assert_eq!(tokens.token_type, "bearer");
    assert!(tokens.refresh_token.is_some());

    let session = app.store.find_by_id(tokens.session_id).await.unwrap();
    assert_eq!(session.user_id, user.id);
    assert_eq!(session.access_token, tokens.access_token);
}

#[tokio::test]
async fn should_return_401_if_incorrect_credentials() {
    let app = TestApp::new().await;
    let (user, _) = app.logged_in_user(false).await;

    let response = app.login(&user.username, "Wr0ng$password", false).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.login("nobody-here", PASSWORD, false).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.login("", "", false).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_ask_inactive_users_to_activate() {
    let app = TestApp::new().await;
    let username = random_username();
    let email = format!("{username}@example.com");
    app.register(&username, &email, PASSWORD).await;

    let response = app.login(&username, PASSWORD, false).await;
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(response.text().await.unwrap(), "Activate account");

    // the link from registration is still pending, so nothing new is sent
    let sent = app.email.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, EmailKind::RegisterEmail);
}

#[tokio::test]
async fn should_return_422_if_malformed_credentials() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/auth/login", &app.address))
        .json(&serde_json::json!({ "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute login request.");
    assert_eq!(response.status().as_u16(), 422);
}
