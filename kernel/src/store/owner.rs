use crate::database::{DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Owner, OwnerDraft, OwnerId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait OwnerStore: 'static + Sync + Send {
    type Connection: 'static + Send;

    async fn create(
        &self,
        con: &mut Self::Connection,
        owner: &OwnerDraft,
    ) -> error_stack::Result<Owner, KernelError>;

    /// Overwrites every field. Fails with [`KernelError::NotFound`] when no
    /// owner has the given id.
    async fn update(
        &self,
        con: &mut Self::Connection,
        owner: &Owner,
    ) -> error_stack::Result<Owner, KernelError>;

    async fn find_by_id(
        &self,
        con: &mut Self::Connection,
        id: &OwnerId,
    ) -> error_stack::Result<Owner, KernelError>;

    async fn delete_by_id(
        &self,
        con: &mut Self::Connection,
        id: &OwnerId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnOwnerStore: 'static + Sync + Send + DependOnDatabaseConnection {
    type OwnerStore: OwnerStore<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn owner_store(&self) -> &Self::OwnerStore;
}
