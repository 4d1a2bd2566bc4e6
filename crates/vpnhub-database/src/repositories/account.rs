//! Account repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use vpnhub_core::error::{AppError, ErrorKind};
use vpnhub_core::result::AppResult;
use vpnhub_core::types::AccountId;
use vpnhub_entity::account::{Account, AccountStatus, NewAccount, Role};

use crate::store::{AccountStore, QUOTA_EXCEEDED_MESSAGE};

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, role, status, full_name, \
     package_id, created_at, expires_at, reseller_id";

/// PostgreSQL-backed account store.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))
    }

    async fn insert(
        tx: &mut Transaction<'static, Postgres>,
        data: &NewAccount,
    ) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO accounts \
             (username, email, password_hash, role, status, full_name, package_id, expires_at, reseller_id) \
             VALUES ($1, $2, $3, $4, 'active', $5, $6, $7, $8) \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(&data.full_name)
        .bind(data.package_id)
        .bind(data.expires_at)
        .bind(data.reseller_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("accounts_username_key") =>
            {
                AppError::conflict(format!("Username '{}' already exists", data.username))
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to create account", other),
        })
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e))
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find account by username", e)
        })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1 ORDER BY id LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
        })
    }

    async fn list_all(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))
    }

    async fn list_by_reseller(&self, reseller: AccountId) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE reseller_id = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(reseller)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list reseller accounts", e)
        })
    }

    async fn create(&self, data: &NewAccount, reseller_quota: Option<i32>) -> AppResult<Account> {
        let mut tx = self.begin().await?;
        let account = Self::insert(&mut tx, data).await?;

        if let Some(quota) = reseller_quota {
            sqlx::query("INSERT INTO resellers (user_id, user_quota) VALUES ($1, $2)")
                .bind(account.id)
                .bind(quota)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to create quota record", e)
                })?;
        }

        Self::commit(tx).await?;
        Ok(account)
    }

    async fn insert_within_quota(
        &self,
        reseller: AccountId,
        data: &NewAccount,
    ) -> AppResult<Account> {
        let mut tx = self.begin().await?;

        // Row lock serializes concurrent provisioning for this reseller.
        let quota: Option<i32> =
            sqlx::query_scalar("SELECT user_quota FROM resellers WHERE user_id = $1 FOR UPDATE")
                .bind(reseller)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock quota record", e)
                })?;

        let used: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE reseller_id = $1")
            .bind(reseller)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count owned accounts", e)
            })?;

        if used >= i64::from(quota.unwrap_or(0)) {
            debug!(reseller_id = %reseller, used, "Quota exhausted inside transaction");
            return Err(AppError::quota_exceeded(QUOTA_EXCEEDED_MESSAGE));
        }

        let account = Self::insert(&mut tx, data).await?;
        Self::commit(tx).await?;
        Ok(account)
    }

    async fn reseller_quota(&self, reseller: AccountId) -> AppResult<Option<i32>> {
        sqlx::query_scalar("SELECT user_quota FROM resellers WHERE user_id = $1")
            .bind(reseller)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read quota", e))
    }

    async fn count_owned(&self, reseller: AccountId) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE reseller_id = $1")
            .bind(reseller)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count owned accounts", e)
            })
    }

    async fn update_email(&self, id: AccountId, email: &str) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(&format!(
            "UPDATE accounts SET email = $2 WHERE id = $1 RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update email", e))?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    async fn update_status(&self, id: AccountId, status: AccountStatus) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(&format!(
            "UPDATE accounts SET status = $2 WHERE id = $1 RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update status", e))?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete account", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired_users(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM accounts WHERE role = $1 AND expires_at < $2")
            .bind(Role::User)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expired accounts", e)
            })?;
        Ok(result.rows_affected())
    }
}
