use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::store::{BookStore, DependOnBookStore, DependOnOwnerStore, OwnerStore};
use kernel::prelude::entity::{Owner, OwnerDraft, OwnerId};
use kernel::KernelError;

use crate::transfer::{
    CreateOwnerWithBooksDto, DeleteOwnerWithBooksDto, GetOwnerWithBooksDto, OwnerWithBooksDto,
    UpdateOwnerWithBooksDto,
};

fn owner_id(id: Option<i64>) -> error_stack::Result<OwnerId, KernelError> {
    id.map(OwnerId::new).ok_or_else(|| {
        Report::new(KernelError::InvalidInput).attach_printable("Owner id is missing")
    })
}

#[async_trait::async_trait]
pub trait CreateOwnerWithBooksService:
    'static + Sync + Send + DependOnOwnerStore + DependOnBookStore
{
    async fn create_owner_with_books(
        &self,
        dto: CreateOwnerWithBooksDto,
    ) -> error_stack::Result<OwnerWithBooksDto, KernelError> {
        let owner = dto.owner.ok_or_else(|| {
            Report::new(KernelError::InvalidInput).attach_printable("Owner payload is missing")
        })?;
        let owner = OwnerDraft::try_from(owner)?;
        let books = dto.books.into_iter().flatten().collect::<Vec<_>>();
        for book in &books {
            book.validate()?;
        }

        let mut connection = self.database_connection().acquire().await?;
        let owner = self.owner_store().create(&mut connection, &owner).await?;
        tracing::info!(owner_id = owner.id().as_ref(), "Owner created");

        let mut created = Vec::with_capacity(books.len());
        for book in books {
            let draft = book.into_draft(*owner.id())?;
            match self.book_store().create(&mut connection, &draft).await? {
                Some(book) => created.push(book),
                None => tracing::debug!(owner_id = owner.id().as_ref(), "Empty book ignored"),
            }
        }
        tracing::info!(
            owner_id = owner.id().as_ref(),
            books = created.len(),
            "Books created"
        );
        Ok(OwnerWithBooksDto::new(owner, created))
    }
}

impl<T> CreateOwnerWithBooksService for T where T: DependOnOwnerStore + DependOnBookStore {}

#[async_trait::async_trait]
pub trait UpdateOwnerWithBooksService:
    'static + Sync + Send + DependOnOwnerStore + DependOnBookStore
{
    async fn update_owner_with_books(
        &self,
        dto: UpdateOwnerWithBooksDto,
    ) -> error_stack::Result<OwnerWithBooksDto, KernelError> {
        let owner = dto.owner.ok_or_else(|| {
            Report::new(KernelError::InvalidRequest).attach_printable("Owner payload is missing")
        })?;
        let owner = Owner::try_from(owner)?;
        let books = dto.books.into_iter().flatten().collect::<Vec<_>>();
        for book in &books {
            book.validate()?;
        }

        let mut connection = self.database_connection().acquire().await?;
        let owner = self.owner_store().update(&mut connection, &owner).await?;
        tracing::info!(owner_id = owner.id().as_ref(), "Owner updated");

        let mut upserted = Vec::with_capacity(books.len());
        for book in books {
            let draft = book.into_draft(*owner.id())?;
            tracing::debug!(intent = ?draft.intent(), "Upserting book");
            if let Some(book) = self.book_store().update(&mut connection, &draft).await? {
                upserted.push(book);
            }
        }
        Ok(OwnerWithBooksDto::new(owner, upserted))
    }
}

impl<T> UpdateOwnerWithBooksService for T where T: DependOnOwnerStore + DependOnBookStore {}

#[async_trait::async_trait]
pub trait GetOwnerWithBooksService:
    'static + Sync + Send + DependOnOwnerStore + DependOnBookStore
{
    async fn get_owner_with_books(
        &self,
        dto: GetOwnerWithBooksDto,
    ) -> error_stack::Result<OwnerWithBooksDto, KernelError> {
        let id = owner_id(dto.id)?;
        let mut connection = self.database_connection().acquire().await?;
        let owner = self.owner_store().find_by_id(&mut connection, &id).await?;
        let books = self
            .book_store()
            .find_by_owner_id(&mut connection, owner.id())
            .await?;
        Ok(OwnerWithBooksDto::new(owner, books))
    }
}

impl<T> GetOwnerWithBooksService for T where T: DependOnOwnerStore + DependOnBookStore {}

#[async_trait::async_trait]
pub trait DeleteOwnerWithBooksService:
    'static + Sync + Send + DependOnOwnerStore + DependOnBookStore
{
    /// Books are removed before the owner is looked up, so a missing owner
    /// still reports [`KernelError::NotFound`] after its books are gone.
    async fn delete_owner_with_books(
        &self,
        dto: DeleteOwnerWithBooksDto,
    ) -> error_stack::Result<(), KernelError> {
        let id = owner_id(dto.id)?;
        let mut connection = self.database_connection().acquire().await?;
        self.book_store()
            .delete_by_owner_id(&mut connection, &id)
            .await?;
        self.owner_store().delete_by_id(&mut connection, &id).await?;
        tracing::info!(owner_id = id.as_ref(), "Owner deleted with books");
        Ok(())
    }
}

impl<T> DeleteOwnerWithBooksService for T where T: DependOnOwnerStore + DependOnBookStore {}
