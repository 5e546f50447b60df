//! Authentication and Authorization
//!
//! This module holds the security-critical pieces of the crate: password
//! hashing and the strength policy, the RS256 token codec, the
//! authentication service, and the authorization guard.
//!
//! # Module Structure
//!
//! - [`auth::password`](crate::auth::password) - bcrypt hashing and the ordered strength policy
//! - [`auth::jwt`](crate::auth::jwt) - RS256 token issuance and verification
//! - [`auth::service`](crate::auth::service) - registration, login, and refresh flows
//! - [`auth::middleware`](crate::auth::middleware) - bearer-token guard and role gates
//!
//! # Security Features
//!
//! - **Password Hashing**: bcrypt with a fixed work factor of 12
//! - **Tokens**: RS256 signed with a private key, verified with a
//!   separately held public key
//! - **Gates**: account-status and role checks run after token
//!   verification on every protected operation

/// RS256 token issuance and verification.
pub mod jwt;
/// Bearer-token guard and role gates for protected operations.
pub mod middleware;
/// Password hashing and the ordered strength policy.
pub mod password;
/// Registration, login, and token refresh flows.
pub mod service;
