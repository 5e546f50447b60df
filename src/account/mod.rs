//! User accounts and the lifecycle state machine.
//!
//! A [`User`] starts out `pending` and becomes `active` through email
//! verification, the only self-service path between statuses. Suspension,
//! banning, and restoration are administrative actions performed by
//! external tooling; this crate only enforces their consequences. Every
//! gate that asks whether an account is usable goes through
//! [`User::is_active`], so the rule is defined in exactly one place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Registered, email not yet verified.
    Pending,
    /// Email verified; the account may use the platform.
    Active,
    /// Administratively suspended; may be restored after review.
    Suspended,
    /// Permanently removed from the platform.
    Banned,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AccountStatus::Pending => "pending",
            AccountStatus::Active => "active",
            AccountStatus::Suspended => "suspended",
            AccountStatus::Banned => "banned",
        })
    }
}

/// Principal role for access control decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Standard account.
    User,
    /// Paying subscriber; premium checks also require an unexpired
    /// subscription.
    Premium,
    /// Platform operator.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Role::User => "user",
            Role::Premium => "premium",
            Role::Admin => "admin",
        })
    }
}

/// An authenticated account.
///
/// The central entity for all user-scoped operations. The password hash
/// is excluded from serialization so the struct can cross a logging or
/// API boundary without leaking credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Immutable identifier, generated once at registration.
    pub id: Uuid,
    /// Login identifier, stored lowercased.
    pub email: String,
    /// Bcrypt hash of the password. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// When the email address was verified.
    pub email_verified_at: Option<DateTime<Utc>>,
    /// Current lifecycle state.
    pub status: AccountStatus,
    /// Current role.
    pub role: Role,
    /// Premium subscription expiry; a premium role without a future
    /// expiry is not eligible.
    pub premium_expires_at: Option<DateTime<Utc>>,
    /// Spendable points. Owned by the points subsystem; gated on account
    /// status here.
    pub point_balance: u32,
    /// Most recent login.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a fresh account: `pending` status, `user` role, zero
    /// balance, unverified email.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            email_verified: false,
            email_verified_at: None,
            status: AccountStatus::Pending,
            role: Role::User,
            premium_expires_at: None,
            point_balance: 0,
            last_login_at: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the email as verified and activate the account.
    ///
    /// Activation only happens from `pending`. An already-active account
    /// is left untouched rather than regressed, and a suspended or banned
    /// account keeps its status even though the email becomes verified.
    pub fn verify_email(&mut self) {
        self.email_verified = true;
        self.email_verified_at = Some(Utc::now());
        if self.status == AccountStatus::Pending {
            self.status = AccountStatus::Active;
        }
    }

    /// Whether the account may use the platform.
    ///
    /// The single source of truth for every status gate in this crate.
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Whether the premium subscription is currently active: premium role
    /// with an expiry strictly in the future. Both sides of the
    /// comparison are UTC.
    pub fn is_premium(&self) -> bool {
        self.role == Role::Premium
            && self
                .premium_expires_at
                .is_some_and(|expires| expires > Utc::now())
    }
}
