//! SQLite Relationship Store
//!
//! Uniqueness of every relation is enforced by UNIQUE constraints in the
//! schema (`migrations/`), so inserts go straight to the database and a
//! constraint violation is classified as `Conflict`.

use crate::config::StoreConfig;
use crate::domain::entities::{Block, FriendPair, Subscription, User, UserId};
use crate::domain::errors::GraphError;
use crate::ports::outbound::{RelationshipStore, RelationshipTransaction};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use serde::Serialize;
use sqlx::{migrate, query, query_as, FromRow, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Re-export of the SQLite connection pool type.
pub type Pool = SqlitePool;

/// Embedded schema migrations.
pub fn migrations() -> Migrator {
    migrate!()
}

/// Run any pending database migrations from inside the application.
pub async fn run_pending_migrations(pool: &Pool) -> Result<(), GraphError> {
    migrations()
        .run(pool)
        .await
        .map_err(|e| GraphError::Database(format!("migration failed: {e}")))
}

/// Classify a driver error once, at the storage boundary.
fn classify(err: sqlx::Error, on_conflict: impl FnOnce() -> GraphError) -> GraphError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => on_conflict(),
        sqlx::Error::RowNotFound => GraphError::NotFound("Resource not found".into()),
        _ => GraphError::Database(err.to_string()),
    }
}

fn db_error(err: sqlx::Error) -> GraphError {
    GraphError::Database(err.to_string())
}

/// Encode a list as one JSON array parameter, expanded in SQL with
/// `json_each`, so bulk lookups never hit the bound-variable limit.
fn json_list<T: Serialize>(items: &[T]) -> Result<String, GraphError> {
    serde_json::to_string(items).map_err(|e| GraphError::Database(e.to_string()))
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(row.id, row.email)
    }
}

#[derive(Debug, FromRow)]
struct BlockRow {
    blocker_id: i64,
    blocked_id: i64,
}

impl From<BlockRow> for Block {
    fn from(row: BlockRow) -> Self {
        Block::new(UserId(row.blocker_id), UserId(row.blocked_id))
    }
}

pub struct SqliteStoreBuilder {
    url: String,
    max_connections: u32,
    busy_timeout: Duration,
    create_if_missing: bool,
    run_migrations: bool,
}

impl Default for SqliteStoreBuilder {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            busy_timeout: Duration::from_secs(5),
            create_if_missing: true,
            run_migrations: true,
        }
    }
}

impl SqliteStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            url: config.database_url.clone(),
            max_connections: config.max_connections,
            busy_timeout: config.busy_timeout(),
            create_if_missing: true,
            run_migrations: config.run_migrations,
        }
    }

    /// Give every temporary database its own name so parallel tests never
    /// share state.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn random_memory_url(mut self) -> Self {
        self.url = format!(
            "sqlite://sgmem{}?mode=memory&cache=private",
            rand::random::<u32>()
        );
        self.max_connections = 1;
        self
    }

    pub fn database_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    pub async fn build(self) -> Result<SqliteRelationshipStore, GraphError> {
        let options = SqliteConnectOptions::from_str(&self.url)
            .map_err(db_error)?
            .create_if_missing(self.create_if_missing)
            .foreign_keys(true)
            .busy_timeout(self.busy_timeout);

        let mut pool_options = SqlitePoolOptions::new().max_connections(self.max_connections);
        if self.is_memory() {
            // An in-memory database disappears with its last connection.
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await.map_err(db_error)?;

        if self.run_migrations {
            run_pending_migrations(&pool).await?;
        }

        info!(
            max_connections = self.max_connections,
            memory = self.is_memory(),
            "SQLite relationship store ready"
        );

        Ok(SqliteRelationshipStore::new(pool))
    }
}

/// SQLite-backed implementation of `RelationshipStore`.
#[derive(Clone, Debug)]
pub struct SqliteRelationshipStore {
    pool: Pool,
}

impl SqliteRelationshipStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

#[async_trait]
impl RelationshipStore for SqliteRelationshipStore {
    async fn insert_user(&self, email: &str) -> Result<User, GraphError> {
        let result = query(
            "
            INSERT INTO
                users (email)
            VALUES
                (?)
            ",
        )
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, || GraphError::email_taken(email)))?;

        Ok(User::new(result.last_insert_rowid(), email))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, GraphError> {
        let row = query_as::<_, UserRow>(
            "
            SELECT
                id,
                email
            FROM
                users
            WHERE
                email = ?
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(User::from)
            .ok_or_else(|| GraphError::user_not_found(email))
    }

    async fn find_users_by_emails(&self, emails: &[String]) -> Result<Vec<User>, GraphError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let rows = query_as::<_, UserRow>(
            "
            SELECT
                id,
                email
            FROM
                users
            WHERE
                email IN (SELECT value FROM json_each(?))
            ORDER BY
                email
            ",
        )
        .bind(json_list(emails)?)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert_friendship(&self, pair: FriendPair) -> Result<(), GraphError> {
        query(
            "
            INSERT INTO
                friendships (user1_id, user2_id)
            VALUES
                (?, ?)
            ",
        )
        .bind(pair.low().as_i64())
        .bind(pair.high().as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, GraphError::already_friends))?;
        Ok(())
    }

    async fn delete_friendship(&self, pair: FriendPair) -> Result<u64, GraphError> {
        let result = query("DELETE FROM friendships WHERE user1_id = ? AND user2_id = ?")
            .bind(pair.low().as_i64())
            .bind(pair.high().as_i64())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected())
    }

    async fn insert_subscription(&self, subscription: Subscription) -> Result<(), GraphError> {
        query(
            "
            INSERT INTO
                subscriptions (subscriber_id, target_id)
            VALUES
                (?, ?)
            ",
        )
        .bind(subscription.subscriber.as_i64())
        .bind(subscription.target.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, GraphError::already_subscribed))?;
        Ok(())
    }

    async fn delete_subscription(&self, subscription: Subscription) -> Result<u64, GraphError> {
        let result = query("DELETE FROM subscriptions WHERE subscriber_id = ? AND target_id = ?")
            .bind(subscription.subscriber.as_i64())
            .bind(subscription.target.as_i64())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected())
    }

    async fn insert_block(&self, block: Block) -> Result<(), GraphError> {
        query(
            "
            INSERT INTO
                blocks (blocker_id, blocked_id)
            VALUES
                (?, ?)
            ",
        )
        .bind(block.blocker.as_i64())
        .bind(block.blocked.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, GraphError::already_blocked))?;
        Ok(())
    }

    async fn block_exists(&self, block: Block) -> Result<bool, GraphError> {
        let row = query("SELECT 1 FROM blocks WHERE blocker_id = ? AND blocked_id = ? LIMIT 1")
            .bind(block.blocker.as_i64())
            .bind(block.blocked.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(row.is_some())
    }

    async fn blocks_involving(
        &self,
        user: UserId,
        others: &[UserId],
    ) -> Result<Vec<Block>, GraphError> {
        if others.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = json_list(&others.iter().map(|id| id.as_i64()).collect::<Vec<_>>())?;
        let rows = query_as::<_, BlockRow>(
            "
            SELECT
                blocker_id,
                blocked_id
            FROM
                blocks
            WHERE
                (blocker_id = ? AND blocked_id IN (SELECT value FROM json_each(?)))
                OR (blocked_id = ? AND blocker_id IN (SELECT value FROM json_each(?)))
            ",
        )
        .bind(user.as_i64())
        .bind(candidates.as_str())
        .bind(user.as_i64())
        .bind(candidates.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        debug!(
            user = %user,
            candidates = others.len(),
            matches = rows.len(),
            "bulk block lookup"
        );
        Ok(rows.into_iter().map(Block::from).collect())
    }

    async fn friends_of(&self, id: UserId) -> Result<Vec<User>, GraphError> {
        let rows = query_as::<_, UserRow>(
            "
            SELECT
                users.id,
                users.email
            FROM
                friendships
            JOIN users
                ON users.id = friendships.user2_id
            WHERE
                friendships.user1_id = ?
            UNION
            SELECT
                users.id,
                users.email
            FROM
                friendships
            JOIN users
                ON users.id = friendships.user1_id
            WHERE
                friendships.user2_id = ?
            ORDER BY
                email
            ",
        )
        .bind(id.as_i64())
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(User::from)
            .filter(|user| user.id != id)
            .collect())
    }

    async fn subscribers_of(&self, id: UserId) -> Result<Vec<User>, GraphError> {
        let rows = query_as::<_, UserRow>(
            "
            SELECT
                users.id,
                users.email
            FROM
                subscriptions
            JOIN users
                ON users.id = subscriptions.subscriber_id
            WHERE
                subscriptions.target_id = ?
            ORDER BY
                users.email
            ",
        )
        .bind(id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn begin(&self) -> Result<Box<dyn RelationshipTransaction>, GraphError> {
        let tx = self.pool.begin().await.map_err(db_error)?;
        Ok(Box::new(SqliteTransaction { tx: Some(tx) }))
    }
}

/// Transaction over the SQLite store. sqlx rolls back on drop.
struct SqliteTransaction {
    tx: Option<sqlx::Transaction<'static, Sqlite>>,
}

impl SqliteTransaction {
    fn active(&mut self) -> Result<&mut sqlx::Transaction<'static, Sqlite>, GraphError> {
        self.tx
            .as_mut()
            .ok_or_else(|| GraphError::Database("transaction already finished".into()))
    }
}

#[async_trait]
impl RelationshipTransaction for SqliteTransaction {
    async fn delete_friendship(&mut self, pair: FriendPair) -> Result<u64, GraphError> {
        let tx = self.active()?;
        let result = query("DELETE FROM friendships WHERE user1_id = ? AND user2_id = ?")
            .bind(pair.low().as_i64())
            .bind(pair.high().as_i64())
            .execute(&mut **tx)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected())
    }

    async fn delete_subscription(
        &mut self,
        subscription: Subscription,
    ) -> Result<u64, GraphError> {
        let tx = self.active()?;
        let result = query("DELETE FROM subscriptions WHERE subscriber_id = ? AND target_id = ?")
            .bind(subscription.subscriber.as_i64())
            .bind(subscription.target.as_i64())
            .execute(&mut **tx)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected())
    }

    async fn insert_block(&mut self, block: Block) -> Result<(), GraphError> {
        let tx = self.active()?;
        query("INSERT INTO blocks (blocker_id, blocked_id) VALUES (?, ?)")
            .bind(block.blocker.as_i64())
            .bind(block.blocked.as_i64())
            .execute(&mut **tx)
            .await
            .map_err(|e| classify(e, GraphError::already_blocked))?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), GraphError> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| GraphError::Database("transaction already finished".into()))?;
        tx.commit().await.map_err(db_error)
    }

    async fn rollback(&mut self) -> Result<(), GraphError> {
        match self.tx.take() {
            Some(tx) => tx.rollback().await.map_err(db_error),
            None => Ok(()),
        }
    }
}
