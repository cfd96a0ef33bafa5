mod author;
mod draft;
mod id;
mod page_count;
mod title;

pub use self::{author::*, draft::*, id::*, page_count::*, title::*};
use crate::entity::OwnerId;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    owner_id: OwnerId,
    title: Option<BookTitle>,
    author: Option<BookAuthor>,
    page_count: BookPageCount,
}

impl Book {
    pub fn new(
        id: BookId,
        owner_id: OwnerId,
        title: Option<BookTitle>,
        author: Option<BookAuthor>,
        page_count: BookPageCount,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            author,
            page_count,
        }
    }
}
