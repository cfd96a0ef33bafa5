use sea_orm::DatabaseConnection;

use kernel::interface::store::BookStore;
use kernel::prelude::entity::{Book, BookDraft, OwnerId};
use kernel::KernelError;

use crate::database::postgres::mapped::MappedBookInternal;
use crate::database::postgres::statement::StatementBookInternal;
use crate::database::postgres::{PersistenceStrategy, PostgresConnection};

pub struct PostgresBookRepository {
    strategy: PersistenceStrategy,
    orm: DatabaseConnection,
}

impl PostgresBookRepository {
    pub fn new(strategy: PersistenceStrategy, orm: DatabaseConnection) -> Self {
        Self { strategy, orm }
    }
}

#[async_trait::async_trait]
impl BookStore for PostgresBookRepository {
    type Connection = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        book: &BookDraft,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        match self.strategy {
            PersistenceStrategy::Mapped => MappedBookInternal::create(&self.orm, book).await,
            PersistenceStrategy::Statement => StatementBookInternal::create(con, book).await,
        }
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        book: &BookDraft,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        match self.strategy {
            PersistenceStrategy::Mapped => MappedBookInternal::update(&self.orm, book).await,
            PersistenceStrategy::Statement => StatementBookInternal::update(con, book).await,
        }
    }

    async fn find_by_owner_id(
        &self,
        con: &mut PostgresConnection,
        owner_id: &OwnerId,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        match self.strategy {
            PersistenceStrategy::Mapped => {
                MappedBookInternal::find_by_owner_id(&self.orm, owner_id).await
            }
            PersistenceStrategy::Statement => {
                StatementBookInternal::find_by_owner_id(con, owner_id).await
            }
        }
    }

    async fn delete_by_owner_id(
        &self,
        con: &mut PostgresConnection,
        owner_id: &OwnerId,
    ) -> error_stack::Result<(), KernelError> {
        match self.strategy {
            PersistenceStrategy::Mapped => {
                MappedBookInternal::delete_by_owner_id(&self.orm, owner_id).await
            }
            PersistenceStrategy::Statement => {
                StatementBookInternal::delete_by_owner_id(con, owner_id).await
            }
        }
    }
}
