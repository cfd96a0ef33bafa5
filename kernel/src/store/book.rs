use crate::database::{DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Book, BookDraft, OwnerId};
use crate::KernelError;

/// Owner-scoped book persistence.
///
/// `create` and `update` return `Ok(None)` when the draft resolves to no
/// book: an empty draft, an upsert aimed at a row that does not exist for the
/// draft's owner, or an upsert that deleted its target. Implementations must
/// agree on this table:
///
/// | id      | empty | row exists | outcome                 |
/// |---------|-------|------------|-------------------------|
/// | none    | yes   | -          | `None`, no write        |
/// | none    | no    | -          | same as `create`        |
/// | some    | -     | no         | `None`, no write        |
/// | some    | yes   | yes        | row deleted, `None`     |
/// | some    | no    | yes        | row overwritten, `Some` |
///
/// Drafts with an id still fail with [`KernelError::NotFound`] first when the
/// owner does not exist.
#[async_trait::async_trait]
pub trait BookStore: 'static + Sync + Send {
    type Connection: 'static + Send;

    async fn create(
        &self,
        con: &mut Self::Connection,
        book: &BookDraft,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    async fn update(
        &self,
        con: &mut Self::Connection,
        book: &BookDraft,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    /// Ordered by book id.
    async fn find_by_owner_id(
        &self,
        con: &mut Self::Connection,
        owner_id: &OwnerId,
    ) -> error_stack::Result<Vec<Book>, KernelError>;

    async fn delete_by_owner_id(
        &self,
        con: &mut Self::Connection,
        owner_id: &OwnerId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookStore: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookStore: BookStore<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn book_store(&self) -> &Self::BookStore;
}
