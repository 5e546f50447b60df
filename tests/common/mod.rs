//! Shared fixtures for the integration suite.

// Each test binary compiles its own copy; not every binary uses every
// fixture.
#![allow(dead_code)]

use chrono::NaiveDate;
use fittrack::{
    AuthConfig, AuthGuard, AuthService, InMemoryUserStore, TokenCodec, UserStore,
};
use std::sync::Arc;
use uuid::Uuid;

pub const PRIVATE_KEY_PEM: &[u8] = include_bytes!("../keys/jwt_private_key.pem");
pub const PUBLIC_KEY_PEM: &[u8] = include_bytes!("../keys/jwt_public_key.pem");

pub const STRONG_PASSWORD: &str = "SecureP@ssw0rd123!";

pub struct Harness {
    pub store: Arc<InMemoryUserStore>,
    pub codec: Arc<TokenCodec>,
    pub service: AuthService,
    pub guard: AuthGuard,
}

pub fn harness() -> Harness {
    let codec = Arc::new(
        TokenCodec::from_pem(PRIVATE_KEY_PEM, PUBLIC_KEY_PEM).expect("test key pair should load"),
    );
    let store = Arc::new(InMemoryUserStore::new());

    // Minimum bcrypt cost keeps the suite fast; the policy values stay
    // at their defaults.
    let config = AuthConfig {
        bcrypt_cost: 4,
        ..AuthConfig::default()
    };

    let service = AuthService::with_config(store.clone(), codec.clone(), &config);
    let guard = AuthGuard::new(store.clone(), codec.clone());

    Harness {
        store,
        codec,
        service,
        guard,
    }
}

pub fn adult_dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 15).expect("valid date")
}

/// Register an account and complete email verification for it, the way
/// the verification-link handler would.
pub async fn register_verified(h: &Harness, email: &str) -> Uuid {
    let registered = h
        .service
        .register(email, STRONG_PASSWORD, adult_dob(), "TX")
        .await
        .expect("registration should succeed");

    let mut user = h
        .store
        .find_by_email(&registered.email)
        .await
        .unwrap()
        .expect("registered user should be stored");
    user.verify_email();
    h.store.save(user).await.expect("save should succeed");

    registered.user_id
}
