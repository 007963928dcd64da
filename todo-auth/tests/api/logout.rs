use todo_auth::domain::{LogoutResponse, SessionStore};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_return_401_if_token_missing_or_invalid() {
    let app = TestApp::new().await;

    let response = app.logout(None).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.logout(Some("invalid")).await;
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(response.text().await.unwrap(), "Invalid or expired token");
}

#[tokio::test]
async fn should_return_200_and_drop_the_session() {
    let app = TestApp::new().await;
    let (_, tokens) = app.logged_in_user(false).await;

    let response = app.logout(Some(&tokens.access_token)).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.json::<LogoutResponse>().await.unwrap().message,
        "Logged out successfully"
    );
    assert!(app.store.find_by_id(tokens.session_id).await.is_err());
}

#[tokio::test]
async fn should_return_200_if_logout_called_twice() {
    let app = TestApp::new().await;
    let (_, tokens) = app.logged_in_user(false).await;

    let response = app.logout(Some(&tokens.access_token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.logout(Some(&tokens.access_token)).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.json::<LogoutResponse>().await.unwrap().message,
        "Already logged out"
    );
}
