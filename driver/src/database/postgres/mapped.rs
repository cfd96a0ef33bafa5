//! Entity-mapped persistence on sea-orm.
//!
//! Rows are loaded as models, changed through their active models and saved
//! back. No SQL is written by hand in here.

use error_stack::Report;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookId, BookPageCount, BookTitle, Owner, OwnerAge, OwnerDraft,
    OwnerFullName, OwnerId, OwnerTitle, UpsertIntent,
};
use kernel::KernelError;

use crate::error::ConvertError;

mod books;
mod owners;

impl From<owners::Model> for Owner {
    fn from(model: owners::Model) -> Self {
        Owner::new(
            OwnerId::new(model.id),
            OwnerTitle::new(model.title),
            OwnerFullName::new(model.full_name),
            OwnerAge::new(model.age),
        )
    }
}

impl From<books::Model> for Book {
    fn from(model: books::Model) -> Self {
        Book::new(
            BookId::new(model.id),
            OwnerId::new(model.owner_id),
            model.title.map(BookTitle::new),
            model.author.map(BookAuthor::new),
            BookPageCount::new(model.page_count),
        )
    }
}

pub(in crate::database) struct MappedOwnerInternal;

impl MappedOwnerInternal {
    async fn find(
        db: &DatabaseConnection,
        id: &OwnerId,
    ) -> error_stack::Result<owners::Model, KernelError> {
        owners::Entity::find_by_id(*id.as_ref())
            .one(db)
            .await
            .convert_error()?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("Owner {} not found", id.as_ref()))
            })
    }

    pub(in crate::database) async fn create(
        db: &DatabaseConnection,
        owner: &OwnerDraft,
    ) -> error_stack::Result<Owner, KernelError> {
        let model = owners::ActiveModel {
            title: Set(owner.title().as_ref().clone()),
            full_name: Set(owner.full_name().as_ref().clone()),
            age: Set(*owner.age().as_ref()),
            ..Default::default()
        }
        .insert(db)
        .await
        .convert_error()?;
        Ok(Owner::from(model))
    }

    pub(in crate::database) async fn update(
        db: &DatabaseConnection,
        owner: &Owner,
    ) -> error_stack::Result<Owner, KernelError> {
        let mut model = Self::find(db, owner.id()).await?.into_active_model();
        model.title = Set(owner.title().as_ref().clone());
        model.full_name = Set(owner.full_name().as_ref().clone());
        model.age = Set(*owner.age().as_ref());
        let model = model.update(db).await.convert_error()?;
        Ok(Owner::from(model))
    }

    pub(in crate::database) async fn find_by_id(
        db: &DatabaseConnection,
        id: &OwnerId,
    ) -> error_stack::Result<Owner, KernelError> {
        Ok(Owner::from(Self::find(db, id).await?))
    }

    /// Books go with the owner through the foreign key cascade.
    pub(in crate::database) async fn delete_by_id(
        db: &DatabaseConnection,
        id: &OwnerId,
    ) -> error_stack::Result<(), KernelError> {
        Self::find(db, id).await?.delete(db).await.convert_error()?;
        Ok(())
    }
}

pub(in crate::database) struct MappedBookInternal;

impl MappedBookInternal {
    pub(in crate::database) async fn create(
        db: &DatabaseConnection,
        book: &BookDraft,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        if book.is_empty() {
            return Ok(None);
        }
        let owner = MappedOwnerInternal::find(db, book.owner_id()).await?;
        let model = books::ActiveModel {
            owner_id: Set(owner.id),
            title: Set(book.title().clone().map(Into::into)),
            author: Set(book.author().clone().map(Into::into)),
            page_count: Set(*book.page_count().as_ref()),
            ..Default::default()
        }
        .insert(db)
        .await
        .convert_error()?;
        Ok(Some(Book::from(model)))
    }

    pub(in crate::database) async fn update(
        db: &DatabaseConnection,
        book: &BookDraft,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let id = match book.intent() {
            UpsertIntent::Skip => return Ok(None),
            UpsertIntent::Create => return Self::create(db, book).await,
            UpsertIntent::Overwrite(id) | UpsertIntent::Discard(id) => id,
        };
        let owner = MappedOwnerInternal::find(db, book.owner_id()).await?;

        let existing = owner
            .find_related(books::Entity)
            .filter(books::Column::Id.eq(*id.as_ref()))
            .one(db)
            .await
            .convert_error()?;
        let Some(existing) = existing else {
            tracing::debug!(
                book_id = id.as_ref(),
                owner_id = owner.id,
                "No book to upsert"
            );
            return Ok(None);
        };

        if book.is_empty() {
            existing.delete(db).await.convert_error()?;
            return Ok(None);
        }

        let mut model = existing.into_active_model();
        model.title = Set(book.title().clone().map(Into::into));
        model.author = Set(book.author().clone().map(Into::into));
        model.page_count = Set(*book.page_count().as_ref());
        let model = model.update(db).await.convert_error()?;
        Ok(Some(Book::from(model)))
    }

    pub(in crate::database) async fn find_by_owner_id(
        db: &DatabaseConnection,
        owner_id: &OwnerId,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let models = books::Entity::find()
            .filter(books::Column::OwnerId.eq(*owner_id.as_ref()))
            .order_by_asc(books::Column::Id)
            .all(db)
            .await
            .convert_error()?;
        Ok(models.into_iter().map(Book::from).collect())
    }

    pub(in crate::database) async fn delete_by_owner_id(
        db: &DatabaseConnection,
        owner_id: &OwnerId,
    ) -> error_stack::Result<(), KernelError> {
        books::Entity::delete_many()
            .filter(books::Column::OwnerId.eq(*owner_id.as_ref()))
            .exec(db)
            .await
            .convert_error()?;
        Ok(())
    }
}
