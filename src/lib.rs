//! # FitTrack Authentication Core
//!
//! Authentication and authorization subsystem for the FitTrack platform:
//! credential hashing, RS256 token issuance and verification, refresh-token
//! renewal, and role-based access control, together with the account
//! lifecycle state machine that decides whether a principal may sign in
//! at all.
//!
//! ## Overview
//!
//! The crate is transport-agnostic. An HTTP (or RPC) layer calls into
//! [`AuthService`] and [`AuthGuard`] and maps the typed [`AuthError`]
//! variants onto wire status codes; persistence is reached through the
//! [`UserStore`] trait, so the crate issues no queries and owns no schema.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fittrack::{AuthConfig, AuthGuard, AuthService, InMemoryUserStore, TokenCodec};
//! use std::sync::Arc;
//!
//! let config = AuthConfig::from_env()?;
//! let codec = Arc::new(
//!     TokenCodec::from_pem_files(&config.private_key_path, &config.public_key_path)?
//!         .with_ttls(config.access_ttl(), config.refresh_ttl()),
//! );
//! let store = Arc::new(InMemoryUserStore::new());
//!
//! let auth = AuthService::with_config(store.clone(), codec.clone(), &config);
//! let guard = AuthGuard::new(store, codec);
//!
//! let registered = auth
//!     .register("user@example.com", "SecureP@ssw0rd123!", date_of_birth, "TX")
//!     .await?;
//! ```
//!
//! ## Security Features
//!
//! - **Password Hashing**: bcrypt with a work factor of 12 and a random
//!   salt per hash
//! - **Tokens**: RS256-signed JWTs; the signing and verification keys are
//!   loaded separately so the verification key can be swapped without
//!   touching issuance
//! - **Enumeration resistance**: unknown email and wrong password are
//!   indistinguishable at login, and token verification failures collapse
//!   to a single outcome
//!
//! ## Modules
//!
//! - [`account`] - User model, roles, statuses, and lifecycle transitions
//! - [`auth`] - Password hashing/policy, token codec, service, and guard
//! - [`store`] - Persistence collaborator contract and in-memory store
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration utilities

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// User model, roles, statuses, and lifecycle transitions.
pub mod account;
/// Password hashing, strength policy, token codec, service, and guard.
pub mod auth;
/// Persistence collaborator contract and the in-memory reference store.
pub mod store;
/// Core types (claims, token pairs, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use account::{AccountStatus, Role, User};
pub use auth::jwt::TokenCodec;
pub use auth::middleware::{bearer_token, require_admin, require_role, AuthGuard};
pub use auth::service::AuthService;
pub use store::{memory::InMemoryUserStore, UserStore};
pub use types::{AuthError, Claims, LoginOutcome, RegisteredUser, Result, TokenPair, UserSummary};
pub use utils::config::AuthConfig;
