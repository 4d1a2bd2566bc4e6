//! Computes a reseller's remaining capacity and gates new-user creation.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use vpnhub_core::error::AppError;
use vpnhub_core::types::AccountId;
use vpnhub_database::store::{AccountStore, QUOTA_EXCEEDED_MESSAGE};
use vpnhub_entity::account::{Account, NewAccount};

/// Snapshot of a reseller's provisioning capacity.
///
/// `total_quota` and `remaining` are `None` for callers without a limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaStatus {
    /// Configured quota.
    pub total_quota: Option<i64>,
    /// Accounts currently owned.
    pub used: i64,
    /// Capacity left, never below zero.
    pub remaining: Option<i64>,
}

impl QuotaStatus {
    /// Whether another account may be provisioned.
    pub fn has_capacity(&self) -> bool {
        self.remaining.is_none_or(|r| r > 0)
    }
}

/// Enforces reseller quotas against the account store.
#[derive(Clone)]
pub struct QuotaEnforcer {
    store: Arc<dyn AccountStore>,
}

impl std::fmt::Debug for QuotaEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaEnforcer").finish_non_exhaustive()
    }
}

impl QuotaEnforcer {
    /// Creates a new quota enforcer.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Current quota usage of a reseller. A reseller without a quota record
    /// has quota zero.
    pub async fn status(&self, reseller: AccountId) -> Result<QuotaStatus, AppError> {
        let quota = i64::from(self.store.reseller_quota(reseller).await?.unwrap_or(0));
        let used = self.store.count_owned(reseller).await?;

        Ok(QuotaStatus {
            total_quota: Some(quota),
            used,
            remaining: Some((quota - used).max(0)),
        })
    }

    /// Report for a caller that is not bound by a quota.
    pub async fn unlimited(&self, owner: AccountId) -> Result<QuotaStatus, AppError> {
        Ok(QuotaStatus {
            total_quota: None,
            used: self.store.count_owned(owner).await?,
            remaining: None,
        })
    }

    /// Fails with `QuotaExceeded` when the reseller has no capacity left.
    ///
    /// This is a fast pre-check; [`QuotaEnforcer::provision`] enforces the
    /// limit atomically with the insert.
    pub async fn check_and_reserve(&self, reseller: AccountId) -> Result<(), AppError> {
        let status = self.status(reseller).await?;
        if !status.has_capacity() {
            warn!(
                reseller_id = %reseller,
                used = status.used,
                total_quota = ?status.total_quota,
                "Reseller quota exhausted"
            );
            return Err(AppError::quota_exceeded(QUOTA_EXCEEDED_MESSAGE));
        }
        Ok(())
    }

    /// Inserts an account owned by `reseller` if, and only if, the reseller
    /// is still below quota at insert time. Callers run
    /// [`QuotaEnforcer::check_and_reserve`] once beforehand.
    pub async fn provision(
        &self,
        reseller: AccountId,
        data: &NewAccount,
    ) -> Result<Account, AppError> {
        let account = self.store.insert_within_quota(reseller, data).await?;
        info!(reseller_id = %reseller, account_id = %account.id, "Quota slot consumed");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use vpnhub_core::error::ErrorKind;
    use vpnhub_core::result::AppResult;
    use vpnhub_database::MemoryAccountStore;
    use vpnhub_entity::account::{AccountStatus, Role};

    /// Delegates to a memory store and counts quota lookups.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryAccountStore,
        quota_reads: AtomicUsize,
    }

    #[async_trait]
    impl AccountStore for CountingStore {
        async fn ping(&self) -> AppResult<()> {
            self.inner.ping().await
        }
        async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
            self.inner.find_by_id(id).await
        }
        async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
            self.inner.find_by_username(username).await
        }
        async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
            self.inner.find_by_email(email).await
        }
        async fn list_all(&self) -> AppResult<Vec<Account>> {
            self.inner.list_all().await
        }
        async fn list_by_reseller(&self, reseller: AccountId) -> AppResult<Vec<Account>> {
            self.inner.list_by_reseller(reseller).await
        }
        async fn create(&self, data: &NewAccount, quota: Option<i32>) -> AppResult<Account> {
            self.inner.create(data, quota).await
        }
        async fn insert_within_quota(
            &self,
            reseller: AccountId,
            data: &NewAccount,
        ) -> AppResult<Account> {
            self.inner.insert_within_quota(reseller, data).await
        }
        async fn reseller_quota(&self, reseller: AccountId) -> AppResult<Option<i32>> {
            self.quota_reads.fetch_add(1, Ordering::SeqCst);
            self.inner.reseller_quota(reseller).await
        }
        async fn count_owned(&self, reseller: AccountId) -> AppResult<i64> {
            self.inner.count_owned(reseller).await
        }
        async fn update_email(&self, id: AccountId, email: &str) -> AppResult<Account> {
            self.inner.update_email(id, email).await
        }
        async fn update_status(&self, id: AccountId, status: AccountStatus) -> AppResult<Account> {
            self.inner.update_status(id, status).await
        }
        async fn delete(&self, id: AccountId) -> AppResult<bool> {
            self.inner.delete(id).await
        }
        async fn delete_expired_users(&self, now: DateTime<Utc>) -> AppResult<u64> {
            self.inner.delete_expired_users(now).await
        }
    }

    fn new_account(username: &str, role: Role, owner: Option<AccountId>) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            email: "x@example.com".to_string(),
            password_hash: "hash".to_string(),
            role,
            full_name: None,
            package_id: None,
            expires_at: Utc::now() + Duration::days(30),
            reseller_id: owner,
        }
    }

    async fn reseller_with_users(quota: i32, owned: usize) -> (QuotaEnforcer, AccountId) {
        let store = Arc::new(MemoryAccountStore::new());
        let reseller = store
            .create(&new_account("res", Role::Reseller, None), Some(quota))
            .await
            .unwrap();
        for i in 0..owned {
            store
                .create(&new_account(&format!("u{i}"), Role::User, Some(reseller.id)), None)
                .await
                .unwrap();
        }
        (QuotaEnforcer::new(store), reseller.id)
    }

    #[tokio::test]
    async fn test_fourth_of_five_allowed() {
        let (quota, reseller) = reseller_with_users(5, 4).await;
        assert!(quota.check_and_reserve(reseller).await.is_ok());
        assert!(quota.provision(reseller, &new_account("new", Role::User, Some(reseller))).await.is_ok());
    }

    #[tokio::test]
    async fn test_fifth_of_five_rejected() {
        let (quota, reseller) = reseller_with_users(5, 5).await;
        let err = quota.check_and_reserve(reseller).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::QuotaExceeded);
        assert_eq!(err.message, "User quota exceeded");
    }

    #[tokio::test]
    async fn test_status_reports_usage() {
        let (quota, reseller) = reseller_with_users(5, 2).await;
        let status = quota.status(reseller).await.unwrap();
        assert_eq!(status.total_quota, Some(5));
        assert_eq!(status.used, 2);
        assert_eq!(status.remaining, Some(3));
    }

    #[tokio::test]
    async fn test_remaining_never_negative() {
        let (quota, reseller) = reseller_with_users(1, 3).await;
        assert_eq!(quota.status(reseller).await.unwrap().remaining, Some(0));
    }

    #[tokio::test]
    async fn test_missing_quota_record_means_zero() {
        let store = Arc::new(MemoryAccountStore::new());
        let quota = QuotaEnforcer::new(store);
        let status = quota.status(AccountId::new(77)).await.unwrap();
        assert_eq!(status.total_quota, Some(0));
        assert!(!status.has_capacity());
    }

    #[tokio::test]
    async fn test_provision_reads_quota_once_per_creation() {
        let store = Arc::new(CountingStore::default());
        let reseller = store
            .create(&new_account("res", Role::Reseller, None), Some(2))
            .await
            .unwrap();
        let quota = QuotaEnforcer::new(store.clone());

        quota.check_and_reserve(reseller.id).await.unwrap();
        quota
            .provision(reseller.id, &new_account("u1", Role::User, Some(reseller.id)))
            .await
            .unwrap();
        assert_eq!(store.quota_reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_provision_at_limit_is_rejected_by_the_insert() {
        let (quota, reseller) = reseller_with_users(2, 2).await;
        let err = quota
            .provision(reseller, &new_account("late", Role::User, Some(reseller)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::QuotaExceeded);
        assert_eq!(quota.status(reseller).await.unwrap().used, 2);
    }
}
