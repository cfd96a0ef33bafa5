use sea_orm::DatabaseConnection;

use kernel::interface::store::OwnerStore;
use kernel::prelude::entity::{Owner, OwnerDraft, OwnerId};
use kernel::KernelError;

use crate::database::postgres::mapped::MappedOwnerInternal;
use crate::database::postgres::statement::StatementOwnerInternal;
use crate::database::postgres::{PersistenceStrategy, PostgresConnection};

pub struct PostgresOwnerRepository {
    strategy: PersistenceStrategy,
    orm: DatabaseConnection,
}

impl PostgresOwnerRepository {
    pub fn new(strategy: PersistenceStrategy, orm: DatabaseConnection) -> Self {
        Self { strategy, orm }
    }

    pub fn strategy(&self) -> PersistenceStrategy {
        self.strategy
    }
}

#[async_trait::async_trait]
impl OwnerStore for PostgresOwnerRepository {
    type Connection = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        owner: &OwnerDraft,
    ) -> error_stack::Result<Owner, KernelError> {
        match self.strategy {
            PersistenceStrategy::Mapped => MappedOwnerInternal::create(&self.orm, owner).await,
            PersistenceStrategy::Statement => StatementOwnerInternal::create(con, owner).await,
        }
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        owner: &Owner,
    ) -> error_stack::Result<Owner, KernelError> {
        match self.strategy {
            PersistenceStrategy::Mapped => MappedOwnerInternal::update(&self.orm, owner).await,
            PersistenceStrategy::Statement => StatementOwnerInternal::update(con, owner).await,
        }
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &OwnerId,
    ) -> error_stack::Result<Owner, KernelError> {
        match self.strategy {
            PersistenceStrategy::Mapped => MappedOwnerInternal::find_by_id(&self.orm, id).await,
            PersistenceStrategy::Statement => StatementOwnerInternal::find_by_id(con, id).await,
        }
    }

    async fn delete_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &OwnerId,
    ) -> error_stack::Result<(), KernelError> {
        match self.strategy {
            PersistenceStrategy::Mapped => MappedOwnerInternal::delete_by_id(&self.orm, id).await,
            PersistenceStrategy::Statement => StatementOwnerInternal::delete_by_id(con, id).await,
        }
    }
}
