//! In-memory account store using a Tokio `RwLock`, for single-process
//! deployments and tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use vpnhub_core::error::AppError;
use vpnhub_core::result::AppResult;
use vpnhub_core::types::AccountId;
use vpnhub_entity::account::{Account, AccountStatus, NewAccount, Role};

use crate::store::{AccountStore, QUOTA_EXCEEDED_MESSAGE};

#[derive(Debug, Default)]
struct InnerState {
    next_id: i64,
    accounts: BTreeMap<AccountId, Account>,
    quotas: BTreeMap<AccountId, i32>,
}

impl InnerState {
    fn owned_count(&self, reseller: AccountId) -> i64 {
        self.accounts
            .values()
            .filter(|a| a.is_owned_by(reseller))
            .count() as i64
    }

    fn insert(&mut self, data: &NewAccount) -> AppResult<Account> {
        if self.accounts.values().any(|a| a.username == data.username) {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        self.next_id += 1;
        let account = Account {
            id: AccountId::new(self.next_id),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            status: AccountStatus::Active,
            full_name: data.full_name.clone(),
            package_id: data.package_id,
            created_at: Utc::now(),
            expires_at: data.expires_at,
            reseller_id: data.reseller_id,
        };
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    fn remove(&mut self, id: AccountId) -> bool {
        let removed = self.accounts.remove(&id).is_some();
        if removed {
            self.quotas.remove(&id);
            for account in self.accounts.values_mut() {
                if account.reseller_id == Some(id) {
                    account.reseller_id = None;
                }
            }
        }
        removed
    }

    fn newest_first<'a>(accounts: impl Iterator<Item = &'a Account>) -> Vec<Account> {
        let mut list: Vec<Account> = accounts.cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        list
    }
}

/// Account store kept entirely in process memory.
///
/// Mirrors the PostgreSQL semantics: unique usernames, quota records that
/// vanish with their reseller, owner references cleared on owner deletion.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.state.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Account>> {
        let state = self.state.read().await;
        Ok(InnerState::newest_first(state.accounts.values()))
    }

    async fn list_by_reseller(&self, reseller: AccountId) -> AppResult<Vec<Account>> {
        let state = self.state.read().await;
        Ok(InnerState::newest_first(
            state.accounts.values().filter(|a| a.is_owned_by(reseller)),
        ))
    }

    async fn create(&self, data: &NewAccount, reseller_quota: Option<i32>) -> AppResult<Account> {
        let mut state = self.state.write().await;
        let account = state.insert(data)?;
        if let Some(quota) = reseller_quota {
            state.quotas.insert(account.id, quota);
        }
        Ok(account)
    }

    async fn insert_within_quota(
        &self,
        reseller: AccountId,
        data: &NewAccount,
    ) -> AppResult<Account> {
        let mut state = self.state.write().await;
        let quota = state.quotas.get(&reseller).copied().unwrap_or(0);
        if state.owned_count(reseller) >= i64::from(quota) {
            return Err(AppError::quota_exceeded(QUOTA_EXCEEDED_MESSAGE));
        }
        state.insert(data)
    }

    async fn reseller_quota(&self, reseller: AccountId) -> AppResult<Option<i32>> {
        Ok(self.state.read().await.quotas.get(&reseller).copied())
    }

    async fn count_owned(&self, reseller: AccountId) -> AppResult<i64> {
        Ok(self.state.read().await.owned_count(reseller))
    }

    async fn update_email(&self, id: AccountId, email: &str) -> AppResult<Account> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;
        account.email = email.to_string();
        Ok(account.clone())
    }

    async fn update_status(&self, id: AccountId, status: AccountStatus) -> AppResult<Account> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;
        account.status = status;
        Ok(account.clone())
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        Ok(self.state.write().await.remove(id))
    }

    async fn delete_expired_users(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let expired: Vec<AccountId> = state
            .accounts
            .values()
            .filter(|a| a.role == Role::User && a.expires_at < now)
            .map(|a| a.id)
            .collect();
        for id in &expired {
            state.remove(*id);
        }
        Ok(expired.len() as u64)
    }
}
