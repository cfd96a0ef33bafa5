use error_stack::Report;
use sqlx::PgConnection;

use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookId, BookPageCount, BookTitle, Owner, OwnerAge, OwnerDraft,
    OwnerFullName, OwnerId, OwnerTitle, UpsertIntent,
};
use kernel::KernelError;

use crate::error::ConvertError;

#[derive(sqlx::FromRow)]
struct OwnerRow {
    id: i64,
    title: String,
    full_name: String,
    age: i32,
}

impl From<OwnerRow> for Owner {
    fn from(row: OwnerRow) -> Self {
        Owner::new(
            OwnerId::new(row.id),
            OwnerTitle::new(row.title),
            OwnerFullName::new(row.full_name),
            OwnerAge::new(row.age),
        )
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    owner_id: i64,
    title: Option<String>,
    author: Option<String>,
    page_count: i64,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book::new(
            BookId::new(row.id),
            OwnerId::new(row.owner_id),
            row.title.map(BookTitle::new),
            row.author.map(BookAuthor::new),
            BookPageCount::new(row.page_count),
        )
    }
}

fn owner_not_found(id: &OwnerId) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("Owner {} not found", id.as_ref()))
}

pub(in crate::database) struct StatementOwnerInternal;

impl StatementOwnerInternal {
    pub(in crate::database) async fn create(
        con: &mut PgConnection,
        owner: &OwnerDraft,
    ) -> error_stack::Result<Owner, KernelError> {
        let row = sqlx::query_as::<_, OwnerRow>(
            // language=postgresql
            r#"
            INSERT INTO owners (title, full_name, age)
            VALUES ($1, $2, $3)
            RETURNING id, title, full_name, age
            "#,
        )
        .bind(owner.title().as_ref())
        .bind(owner.full_name().as_ref())
        .bind(owner.age().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Owner::from(row))
    }

    pub(in crate::database) async fn update(
        con: &mut PgConnection,
        owner: &Owner,
    ) -> error_stack::Result<Owner, KernelError> {
        // language=postgresql
        let affected = sqlx::query(
            r#"
            UPDATE owners
            SET title = $2, full_name = $3, age = $4
            WHERE id = $1
            "#,
        )
        .bind(owner.id().as_ref())
        .bind(owner.title().as_ref())
        .bind(owner.full_name().as_ref())
        .bind(owner.age().as_ref())
        .execute(con)
        .await
        .convert_error()?
        .rows_affected();
        if affected == 0 {
            return Err(owner_not_found(owner.id()));
        }
        Ok(owner.clone())
    }

    pub(in crate::database) async fn find_by_id(
        con: &mut PgConnection,
        id: &OwnerId,
    ) -> error_stack::Result<Owner, KernelError> {
        let row = sqlx::query_as::<_, OwnerRow>(
            // language=postgresql
            r#"
            SELECT id, title, full_name, age
            FROM owners
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Owner::from).ok_or_else(|| owner_not_found(id))
    }

    pub(in crate::database) async fn delete_by_id(
        con: &mut PgConnection,
        id: &OwnerId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let affected = sqlx::query(
            r#"
            DELETE FROM owners
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?
        .rows_affected();
        if affected == 0 {
            return Err(owner_not_found(id));
        }
        Ok(())
    }

    async fn exists(
        con: &mut PgConnection,
        id: &OwnerId,
    ) -> error_stack::Result<bool, KernelError> {
        let (exists,) = sqlx::query_as::<_, (bool,)>(
            // language=postgresql
            r#"
            SELECT EXISTS(SELECT 1 FROM owners WHERE id = $1)
            "#,
        )
        .bind(id.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(exists)
    }
}

pub(in crate::database) struct StatementBookInternal;

impl StatementBookInternal {
    pub(in crate::database) async fn create(
        con: &mut PgConnection,
        book: &BookDraft,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        if book.is_empty() {
            return Ok(None);
        }
        // No returned row means the owner does not exist.
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            INSERT INTO books (owner_id, title, author, page_count)
            SELECT $1, $2, $3, $4
            WHERE EXISTS(SELECT 1 FROM owners WHERE id = $1)
            RETURNING id, owner_id, title, author, page_count
            "#,
        )
        .bind(book.owner_id().as_ref())
        .bind(book.title().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.author().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.page_count().as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        match row {
            Some(row) => Ok(Some(Book::from(row))),
            None => Err(owner_not_found(book.owner_id())),
        }
    }

    pub(in crate::database) async fn update(
        con: &mut PgConnection,
        book: &BookDraft,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let (id, discard) = match book.intent() {
            UpsertIntent::Skip => return Ok(None),
            UpsertIntent::Create => return Self::create(con, book).await,
            UpsertIntent::Discard(id) => (id, true),
            UpsertIntent::Overwrite(id) => (id, false),
        };
        if !StatementOwnerInternal::exists(con, book.owner_id()).await? {
            return Err(owner_not_found(book.owner_id()));
        }

        if discard {
            // language=postgresql
            let affected = sqlx::query(
                r#"
                DELETE FROM books
                WHERE id = $1 AND owner_id = $2
                "#,
            )
            .bind(id.as_ref())
            .bind(book.owner_id().as_ref())
            .execute(con)
            .await
            .convert_error()?
            .rows_affected();
            if affected == 0 {
                tracing::debug!(book_id = id.as_ref(), "No book to discard");
            }
            return Ok(None);
        }

        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            UPDATE books
            SET title = $3, author = $4, page_count = $5
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, author, page_count
            "#,
        )
        .bind(id.as_ref())
        .bind(book.owner_id().as_ref())
        .bind(book.title().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.author().as_ref().map(AsRef::<String>::as_ref))
        .bind(book.page_count().as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        if row.is_none() {
            tracing::debug!(book_id = id.as_ref(), "No book to overwrite");
        }
        Ok(row.map(Book::from))
    }

    pub(in crate::database) async fn find_by_owner_id(
        con: &mut PgConnection,
        owner_id: &OwnerId,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, owner_id, title, author, page_count
            FROM books
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    pub(in crate::database) async fn delete_by_owner_id(
        con: &mut PgConnection,
        owner_id: &OwnerId,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM books
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
