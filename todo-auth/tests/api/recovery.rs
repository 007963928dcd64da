use todo_auth::domain::{EmailKind, UserRecord};

use crate::common::PASSWORD;
use crate::helpers::TestApp;

#[tokio::test]
async fn should_reset_password_with_the_emailed_link() {
    let app = TestApp::new().await;
    let (user, _) = app.logged_in_user(false).await;

    let response = app.get_forgot_password_email(&user.email).await;
    assert_eq!(response.status().as_u16(), 200);
    let link = app
        .email
        .last_token_for(&user.email, EmailKind::RecoverPassword)
        .await
        .expect("recovery email sent");

    let response = app.forgot_password(&link, "N3w$ecret!").await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<UserRecord>().await.unwrap().id, user.id);

    let response = app.login(&user.username, PASSWORD, false).await;
    assert_eq!(response.status().as_u16(), 401);
    let response = app.login(&user.username, "N3w$ecret!", false).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.forgot_password(&link, "An0ther$ecret").await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_reject_weak_passwords_before_spending_the_link() {
    let app = TestApp::new().await;
    let (user, _) = app.logged_in_user(false).await;
    app.get_forgot_password_email(&user.email).await;
    let link = app
        .email
        .last_token_for(&user.email, EmailKind::RecoverPassword)
        .await
        .unwrap();

    let response = app.forgot_password(&link, "short").await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.forgot_password(&link, "N3w$ecret!").await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_report_unknown_addresses_and_delivery_failures() {
    let app = TestApp::new().await;
    let (user, _) = app.logged_in_user(false).await;

    let response = app.get_forgot_password_email("ghost@example.com").await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.get_forgot_password_email("not-an-email").await;
    assert_eq!(response.status().as_u16(), 400);

    app.email.set_failing(true);
    let response = app.get_forgot_password_email(&user.email).await;
    assert_eq!(response.status().as_u16(), 400);
}
