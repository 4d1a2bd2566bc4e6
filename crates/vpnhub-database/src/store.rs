//! The account store abstraction shared by the PostgreSQL repository and
//! the in-memory implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use vpnhub_core::result::AppResult;
use vpnhub_core::types::AccountId;
use vpnhub_entity::account::{Account, AccountStatus, NewAccount};

/// Persistence operations for accounts and reseller quota records.
///
/// Lookups return `Ok(None)` for missing rows; mutations of a missing row
/// return a `NotFound` error. A duplicate username is a `Conflict`.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Cheap connectivity check.
    async fn ping(&self) -> AppResult<()>;

    /// Find an account by primary key.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Find an account by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Find the first account registered with this exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// All accounts, newest first.
    async fn list_all(&self) -> AppResult<Vec<Account>>;

    /// Accounts owned by `reseller`, newest first.
    async fn list_by_reseller(&self, reseller: AccountId) -> AppResult<Vec<Account>>;

    /// Insert an account. When `reseller_quota` is given a quota record is
    /// written for the new account in the same transaction.
    async fn create(&self, data: &NewAccount, reseller_quota: Option<i32>) -> AppResult<Account>;

    /// Insert an account owned by `reseller` only if the reseller is still
    /// below quota, serialized against concurrent inserts for the same
    /// reseller. Fails with `QuotaExceeded` otherwise.
    async fn insert_within_quota(
        &self,
        reseller: AccountId,
        data: &NewAccount,
    ) -> AppResult<Account>;

    /// The reseller's quota, or `None` when no quota record exists.
    async fn reseller_quota(&self, reseller: AccountId) -> AppResult<Option<i32>>;

    /// Number of accounts owned by `reseller`.
    async fn count_owned(&self, reseller: AccountId) -> AppResult<i64>;

    /// Replace an account's email.
    async fn update_email(&self, id: AccountId, email: &str) -> AppResult<Account>;

    /// Set an account's status.
    async fn update_status(&self, id: AccountId, status: AccountStatus) -> AppResult<Account>;

    /// Delete an account. Returns `false` when no such account existed.
    async fn delete(&self, id: AccountId) -> AppResult<bool>;

    /// Delete every `user` account whose expiry is strictly before `now`.
    async fn delete_expired_users(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Message used for quota rejections by every store implementation.
pub const QUOTA_EXCEEDED_MESSAGE: &str = "User quota exceeded";
