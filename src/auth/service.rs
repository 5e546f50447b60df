//! Registration, login, and token refresh.
//!
//! The service orchestrates the policy, hasher, state machine, codec, and
//! store. It holds no mutable state of its own; everything it needs is
//! injected at construction time.

use crate::account::{AccountStatus, User};
use crate::auth::jwt::TokenCodec;
use crate::auth::password::{
    hash_password_with_cost, validate_password_strength, verify_password, BCRYPT_COST,
};
use crate::store::UserStore;
use crate::types::{AuthError, LoginOutcome, RegisteredUser, Result, TokenPair, UserSummary};
use crate::utils::config::AuthConfig;
use chrono::{Datelike, NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Minimum age required to register.
pub const MINIMUM_AGE: u32 = 18;

/// Region codes where registration is unavailable, pending legal review.
pub const INELIGIBLE_STATES: [&str; 3] = ["NY", "FL", "RI"];

/// Orchestrates registration, login, and refresh against the injected
/// store and codec.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    codec: Arc<TokenCodec>,
    bcrypt_cost: u32,
    minimum_age: u32,
    ineligible_states: HashSet<String>,
}

impl AuthService {
    /// Build a service with the default policy set.
    pub fn new(store: Arc<dyn UserStore>, codec: Arc<TokenCodec>) -> Self {
        Self {
            store,
            codec,
            bcrypt_cost: BCRYPT_COST,
            minimum_age: MINIMUM_AGE,
            ineligible_states: INELIGIBLE_STATES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Build a service with policy values taken from configuration.
    pub fn with_config(
        store: Arc<dyn UserStore>,
        codec: Arc<TokenCodec>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            codec,
            bcrypt_cost: config.bcrypt_cost,
            minimum_age: config.minimum_age,
            ineligible_states: config.ineligible_states.iter().cloned().collect(),
        }
    }

    /// Register a new account.
    ///
    /// Checks run in order and the first failure wins: email uniqueness,
    /// password policy, age, state eligibility. On success the account is
    /// persisted as `pending` and must verify its email before login.
    ///
    /// The store's insert is the real uniqueness guard under concurrency;
    /// the lookup ahead of it only produces the friendly error for the
    /// common case.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        date_of_birth: NaiveDate,
        state_of_residence: &str,
    ) -> Result<RegisteredUser> {
        let email = normalize_email(email);

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AuthError::Conflict(
                "Email address already exists".to_string(),
            ));
        }

        let verdict = validate_password_strength(password);
        if !verdict.valid {
            return Err(AuthError::Validation(verdict.message.to_string()));
        }

        let age = age_in_years(date_of_birth, Utc::now().date_naive());
        if age < self.minimum_age as i32 {
            return Err(AuthError::Eligibility(format!(
                "You must be at least {} years old to register",
                self.minimum_age
            )));
        }

        if self
            .ineligible_states
            .contains(&state_of_residence.to_uppercase())
        {
            return Err(AuthError::Eligibility(format!(
                "Registration is not available in {} at this time",
                state_of_residence
            )));
        }

        let password_hash = hash_password_with_cost(password, self.bcrypt_cost)?;
        let user = User::new(email, password_hash);
        let registered = RegisteredUser {
            user_id: user.id,
            email: user.email.clone(),
        };
        self.store.insert(user).await?;

        info!(user_id = %registered.user_id, "user registered, pending email verification");
        Ok(registered)
    }

    /// Authenticate a principal and issue an access/refresh token pair.
    ///
    /// An unknown email and a wrong password produce byte-identical
    /// failures, so login cannot be used to enumerate accounts. The
    /// remaining gates run only after the password check; their messages
    /// are post-authentication disclosures and may name the account
    /// state.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let email = normalize_email(email);

        let Some(mut user) = self.store.find_by_email(&email).await? else {
            return Err(invalid_credentials());
        };

        if !verify_password(password, &user.password_hash) {
            return Err(invalid_credentials());
        }

        if !user.email_verified {
            return Err(AuthError::Authorization(
                "Please verify your email address before logging in".to_string(),
            ));
        }

        match user.status {
            AccountStatus::Banned => {
                return Err(AuthError::Authorization(
                    "Your account has been banned.".to_string(),
                ));
            }
            AccountStatus::Suspended => {
                return Err(AuthError::Authorization(
                    "Your account has been suspended. Please contact support.".to_string(),
                ));
            }
            AccountStatus::Active => {}
            AccountStatus::Pending => {
                return Err(AuthError::Authorization(
                    "Your account is not active. Please verify your email.".to_string(),
                ));
            }
        }

        user.last_login_at = Some(Utc::now());
        self.store.save(user.clone()).await?;

        // Tokens always carry the stored identifier, never a fresh one.
        let tokens = TokenPair {
            access_token: self.codec.issue_access(user.id, &user.email, user.role)?,
            refresh_token: self.codec.issue_refresh(user.id)?,
            expires_in: self.codec.access_ttl().num_seconds(),
        };

        info!(user_id = %user.id, "login successful");
        Ok(LoginOutcome {
            tokens,
            user: UserSummary {
                user_id: user.id,
                email: user.email,
                role: user.role,
                point_balance: user.point_balance,
            },
        })
    }

    /// Mint a new access token from a refresh token.
    ///
    /// The refresh token itself is not rotated. Every failure mode
    /// (verification, unknown subject, unusable account) collapses to one
    /// generic outcome; the concrete cause goes to the debug log only.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String> {
        let Some(claims) = self.codec.verify(refresh_token) else {
            debug!("refresh rejected: token failed verification");
            return Err(invalid_refresh());
        };

        let Ok(user_id) = Uuid::parse_str(&claims.sub) else {
            debug!("refresh rejected: malformed subject claim");
            return Err(invalid_refresh());
        };

        let Some(user) = self.store.find_by_id(user_id).await? else {
            debug!(%user_id, "refresh rejected: unknown principal");
            return Err(invalid_refresh());
        };

        if !user.is_active() {
            debug!(user_id = %user.id, status = %user.status, "refresh rejected: account not active");
            return Err(invalid_refresh());
        }

        self.codec.issue_access(user.id, &user.email, user.role)
    }
}

/// Lowercase and trim an email for storage and lookup. Every email the
/// store sees has passed through here.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Calendar-correct age: year difference, minus one if the birthday has
/// not yet occurred this year.
fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

fn invalid_credentials() -> AuthError {
    AuthError::Authentication("Invalid email or password".to_string())
}

fn invalid_refresh() -> AuthError {
    AuthError::Authentication("Invalid or expired refresh token".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn age_counts_completed_years_only() {
        let dob = date(1990, 6, 15);

        assert_eq!(age_in_years(dob, date(2008, 6, 14)), 17);
        assert_eq!(age_in_years(dob, date(2008, 6, 15)), 18);
        assert_eq!(age_in_years(dob, date(2008, 6, 16)), 18);
        assert_eq!(age_in_years(dob, date(2008, 12, 31)), 18);
        assert_eq!(age_in_years(dob, date(2009, 1, 1)), 18);
    }

    #[test]
    fn age_handles_year_boundaries() {
        let dob = date(2000, 1, 1);
        assert_eq!(age_in_years(dob, date(2017, 12, 31)), 17);
        assert_eq!(age_in_years(dob, date(2018, 1, 1)), 18);
    }

    #[test]
    fn age_handles_leap_day_birthdays() {
        let dob = date(2004, 2, 29);
        // In a non-leap year the birthday is counted from March 1.
        assert_eq!(age_in_years(dob, date(2022, 2, 28)), 17);
        assert_eq!(age_in_years(dob, date(2022, 3, 1)), 18);
    }

    #[test]
    fn emails_normalize_to_lowercase() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
        assert_eq!(normalize_email("user@example.com"), "user@example.com");
    }
}
