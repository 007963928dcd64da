use todo_auth::domain::{EmailKind, SessionStore, UserRecord};

use crate::common::{random_username, PASSWORD};
use crate::helpers::TestApp;

#[tokio::test]
async fn should_return_201_and_send_activation_email() {
    let app = TestApp::new().await;
    let username = random_username();
    let email = format!("{username}@example.com");

    let response = app.register(&username, &email, PASSWORD).await;
    assert_eq!(response.status().as_u16(), 201);

    let user = response
        .json::<UserRecord>()
        .await
        .expect("Could not deserialize response body to UserRecord");
    assert_eq!(user.username, username);
    assert!(!user.is_active);

    let sent = app.email.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, EmailKind::RegisterEmail);
}

#[tokio::test]
async fn should_return_400_for_invalid_fields() {
    let app = TestApp::new().await;
    let username = random_username();
    let email = format!("{username}@example.com");

    let cases = [
        ("x", email.as_str(), PASSWORD),
        (username.as_str(), "not-an-email", PASSWORD),
        (username.as_str(), email.as_str(), "short"),
    ];
    for (username, email, password) in cases {
        let response = app.register(username, email, password).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {username} {email} {password}"
        );
    }
    assert!(app.email.sent().await.is_empty());
}

#[tokio::test]
async fn should_return_422_if_malformed_input() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/auth/register", &app.address))
        .json(&serde_json::json!({ "username": "someone" }))
        .send()
        .await
        .expect("Failed to execute register request.");
    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn should_return_409_if_user_already_exists() {
    let app = TestApp::new().await;
    let username = random_username();
    let email = format!("{username}@example.com");

    let response = app.register(&username, &email, PASSWORD).await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app.register(&username, &email, PASSWORD).await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(
        response.text().await.unwrap(),
        format!("User {email} already exists")
    );
}

#[tokio::test]
async fn activation_link_is_single_use() {
    let app = TestApp::new().await;
    let username = random_username();
    let email = format!("{username}@example.com");
    let user = app
        .register(&username, &email, PASSWORD)
        .await
        .json::<UserRecord>()
        .await
        .unwrap();
    let link = app
        .email
        .last_token_for(&email, EmailKind::RegisterEmail)
        .await
        .unwrap();

    let response = app.activate_account(&link).await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.json::<UserRecord>().await.unwrap().is_active);
    assert!(app.store.list_by_user(user.id).await.unwrap().is_empty());

    let response = app.activate_account(&link).await;
    assert_eq!(response.status().as_u16(), 401);
}
