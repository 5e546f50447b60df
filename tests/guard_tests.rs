//! Integration tests for the authorization guard and role gates.

mod common;

use common::{harness, register_verified, STRONG_PASSWORD};
use fittrack::{bearer_token, require_admin, require_role, AccountStatus, AuthError, Role, UserStore};
use uuid::Uuid;

#[tokio::test]
async fn authenticate_resolves_an_active_principal() {
    let h = harness();
    let user_id = register_verified(&h, "user@example.com").await;

    let outcome = h
        .service
        .login("user@example.com", STRONG_PASSWORD)
        .await
        .unwrap();

    let header = format!("Bearer {}", outcome.tokens.access_token);
    let raw = bearer_token(&header).expect("bearer scheme should strip");
    let user = h
        .guard
        .authenticate(raw)
        .await
        .expect("valid token should authenticate");

    assert_eq!(user.id, user_id);
    assert!(user.is_active());
}

#[tokio::test]
async fn suspended_account_with_valid_token_is_an_authorization_failure() {
    let h = harness();
    let user_id = register_verified(&h, "user@example.com").await;

    let outcome = h
        .service
        .login("user@example.com", STRONG_PASSWORD)
        .await
        .unwrap();

    // Suspension lands after the token was issued; the token is still
    // cryptographically valid and unexpired.
    let mut user = h.store.find_by_id(user_id).await.unwrap().unwrap();
    user.status = AccountStatus::Suspended;
    h.store.save(user).await.unwrap();

    let err = h
        .guard
        .authenticate(&outcome.tokens.access_token)
        .await
        .unwrap_err();

    match err {
        AuthError::Authorization(message) => {
            assert!(
                message.contains("suspended"),
                "operators need the current status: {}",
                message
            );
        }
        other => panic!("expected authorization error, got {:?}", other),
    }
}

#[tokio::test]
async fn invalid_token_is_an_authentication_failure() {
    let h = harness();

    let err = h.guard.authenticate("not.a.token").await.unwrap_err();
    assert!(matches!(err, AuthError::Authentication(_)));
}

#[tokio::test]
async fn token_for_unknown_subject_is_an_authentication_failure() {
    let h = harness();

    // Cryptographically valid token for a principal the store has never
    // seen.
    let token = h
        .codec
        .issue_access(Uuid::new_v4(), "ghost@example.com", Role::User)
        .unwrap();

    let err = h.guard.authenticate(&token).await.unwrap_err();
    assert!(matches!(err, AuthError::Authentication(_)));
}

#[tokio::test]
async fn role_gates_chain_after_authentication() {
    let h = harness();
    let user_id = register_verified(&h, "admin@example.com").await;

    let mut user = h.store.find_by_id(user_id).await.unwrap().unwrap();
    user.role = Role::Admin;
    h.store.save(user).await.unwrap();

    let outcome = h
        .service
        .login("admin@example.com", STRONG_PASSWORD)
        .await
        .unwrap();

    let user = h
        .guard
        .authenticate(&outcome.tokens.access_token)
        .await
        .unwrap();

    let admin = require_role(user, &[Role::Premium, Role::Admin])
        .and_then(require_admin)
        .expect("admin should pass both gates");
    assert_eq!(admin.id, user_id);
}

#[tokio::test]
async fn plain_user_is_rejected_by_admin_gate() {
    let h = harness();
    register_verified(&h, "user@example.com").await;

    let outcome = h
        .service
        .login("user@example.com", STRONG_PASSWORD)
        .await
        .unwrap();
    let user = h
        .guard
        .authenticate(&outcome.tokens.access_token)
        .await
        .unwrap();

    let err = require_admin(user).unwrap_err();
    match err {
        AuthError::Authorization(message) => {
            assert_eq!(message, "Insufficient permissions. Required role: admin");
        }
        other => panic!("expected authorization error, got {:?}", other),
    }
}
