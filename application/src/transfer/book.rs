use error_stack::Report;

use kernel::prelude::entity::{
    Book, BookAuthor, BookDraft, BookId, BookPageCount, BookTitle, DestructBook, OwnerId,
};
use kernel::KernelError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: i64,
    pub owner_id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_count: i64,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            owner_id,
            title,
            author,
            page_count,
        } = value.into_destruct();
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            title: title.map(Into::into),
            author: author.map(Into::into),
            page_count: page_count.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookDto {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_count: i64,
}

/// `id` of `None` or `0` addresses a book that does not exist yet.
#[derive(Debug, Clone)]
pub struct UpdateBookDto {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_count: i64,
}

fn page_count(count: i64) -> error_stack::Result<BookPageCount, KernelError> {
    if count < 0 {
        return Err(Report::new(KernelError::InvalidInput)
            .attach_printable(format!("Page count must not be negative: {count}")));
    }
    Ok(BookPageCount::new(count))
}

impl CreateBookDto {
    pub fn validate(&self) -> error_stack::Result<(), KernelError> {
        page_count(self.page_count).map(|_| ())
    }

    pub fn into_draft(self, owner_id: OwnerId) -> error_stack::Result<BookDraft, KernelError> {
        Ok(BookDraft::new(
            None,
            owner_id,
            self.title.map(BookTitle::new),
            self.author.map(BookAuthor::new),
            page_count(self.page_count)?,
        ))
    }
}

impl UpdateBookDto {
    fn book_id(&self) -> error_stack::Result<Option<BookId>, KernelError> {
        match self.id {
            None | Some(0) => Ok(None),
            Some(id) if id < 0 => Err(Report::new(KernelError::InvalidRequest)
                .attach_printable(format!("Book id must not be negative: {id}"))),
            Some(id) => Ok(Some(BookId::new(id))),
        }
    }

    pub fn validate(&self) -> error_stack::Result<(), KernelError> {
        self.book_id()?;
        page_count(self.page_count).map(|_| ())
    }

    pub fn into_draft(self, owner_id: OwnerId) -> error_stack::Result<BookDraft, KernelError> {
        Ok(BookDraft::new(
            self.book_id()?,
            owner_id,
            self.title.map(BookTitle::new),
            self.author.map(BookAuthor::new),
            page_count(self.page_count)?,
        ))
    }
}
