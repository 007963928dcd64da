use chrono::Duration;

use todo_auth::domain::{CheckAuthResponse, NewSession, SessionStore, TokenKind};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_return_the_same_token_while_fresh() {
    let app = TestApp::new().await;
    let (_, tokens) = app.logged_in_user(false).await;

    let response = app.check_auth(Some(&tokens.access_token)).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.json::<CheckAuthResponse>().await.unwrap().token,
        tokens.access_token
    );
}

#[tokio::test]
async fn should_rotate_a_token_close_to_expiry() {
    let app = TestApp::new().await;
    let (user, _) = app.logged_in_user(false).await;

    let minted = app
        .fixture
        .codec
        .mint(&user.email, TokenKind::Access, Duration::seconds(120))
        .unwrap();
    let session = app
        .store
        .create(NewSession::new(user.id, minted.token.clone()))
        .await
        .unwrap();

    let response = app.check_auth(Some(&minted.token)).await;
    assert_eq!(response.status().as_u16(), 200);
    let rotated = response.json::<CheckAuthResponse>().await.unwrap().token;
    assert_ne!(rotated, minted.token);
    assert_eq!(
        app.store.find_by_id(session.session_id).await.unwrap().access_token,
        rotated
    );

    let response = app.check_auth(Some(&minted.token)).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.check_auth(Some(&rotated)).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_401_for_unusable_tokens() {
    let app = TestApp::new().await;
    let (user, tokens) = app.logged_in_user(true).await;

    let response = app.check_auth(None).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.check_auth(Some("invalid")).await;
    assert_eq!(response.status().as_u16(), 401);

    // a refresh token is not an access token
    let refresh = tokens.refresh_token.expect("remember me issues a refresh token");
    let response = app.check_auth(Some(&refresh)).await;
    assert_eq!(response.status().as_u16(), 401);

    // validly signed but backed by no session
    let orphan = app.fixture.tokens.mint_access(&user.email).unwrap();
    let response = app.check_auth(Some(&orphan.token)).await;
    assert_eq!(response.status().as_u16(), 401);
}
