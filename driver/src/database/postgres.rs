use std::fmt::Display;
use std::str::FromStr;

use error_stack::{Report, ResultExt};
use sea_orm::SqlxPostgresConnector;
use sqlx::pool::PoolConnection;
use sqlx::{Pool, Postgres};

use kernel::interface::database::DatabaseConnection;
use kernel::interface::store::{DependOnBookStore, DependOnOwnerStore};
use kernel::KernelError;

use crate::error::ConvertError;
use crate::{env, env_or};

pub use self::{book::*, owner::*};

mod book;
mod mapped;
mod owner;
mod statement;

#[cfg(test)]
mod conformance;

static POSTGRES_URL: &str = "POSTGRES_URL";
static PERSISTENCE_STRATEGY: &str = "PERSISTENCE_STRATEGY";

pub type PostgresConnection = PoolConnection<Postgres>;

/// How owners and books are written to and read from PostgreSQL.
///
/// Both strategies implement the same store contract and are expected to be
/// observably identical.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum PersistenceStrategy {
    /// Rows are loaded as sea-orm models and saved back through active models.
    #[default]
    Mapped,
    /// Hand-written statements that rely on `RETURNING` and affected row counts.
    Statement,
}

impl FromStr for PersistenceStrategy {
    type Err = Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mapped" => Ok(Self::Mapped),
            "statement" => Ok(Self::Statement),
            other => Err(Report::new(KernelError::StorageFailure)
                .attach_printable(format!("Unknown persistence strategy `{other}`"))),
        }
    }
}

impl Display for PersistenceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceStrategy::Mapped => write!(f, "mapped"),
            PersistenceStrategy::Statement => write!(f, "statement"),
        }
    }
}

pub struct PostgresDatabase {
    pool: Pool<Postgres>,
    owners: PostgresOwnerRepository,
    books: PostgresBookRepository,
}

impl PostgresDatabase {
    /// Connects using `POSTGRES_URL` with the strategy named by
    /// `PERSISTENCE_STRATEGY` (`mapped` when unset).
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let strategy = env_or(PERSISTENCE_STRATEGY, "mapped").parse()?;
        Self::with_strategy(strategy).await
    }

    pub async fn with_strategy(
        strategy: PersistenceStrategy,
    ) -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url)
            .await
            .convert_error()
            .attach_printable("Failed to connect to postgres")?;
        tracing::info!(%strategy, "Connected to postgres");
        // The mapped strategy shares this pool through sea-orm.
        let orm = || SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
        Ok(Self {
            owners: PostgresOwnerRepository::new(strategy, orm()),
            books: PostgresBookRepository::new(strategy, orm()),
            pool,
        })
    }

    pub async fn migrate(&self) -> error_stack::Result<(), KernelError> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .convert_error()
            .attach_printable("Failed to apply migrations")
    }

    pub fn strategy(&self) -> PersistenceStrategy {
        self.owners.strategy()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Connection = PostgresConnection;
    async fn acquire(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        self.pool.acquire().await.convert_error()
    }
}

impl DependOnOwnerStore for PostgresDatabase {
    type OwnerStore = PostgresOwnerRepository;
    fn owner_store(&self) -> &Self::OwnerStore {
        &self.owners
    }
}

impl DependOnBookStore for PostgresDatabase {
    type BookStore = PostgresBookRepository;
    fn book_store(&self) -> &Self::BookStore {
        &self.books
    }
}
