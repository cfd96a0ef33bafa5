use destructure::Destructure;
use vodca::References;

use crate::entity::{Book, BookAuthor, BookId, BookPageCount, BookTitle, OwnerId};

/// A book payload as submitted for creation or upsert.
///
/// `id` is `None` until the store has assigned one. Drafts with every core
/// field unset are treated as tombstones rather than as books, see
/// [`BookDraft::is_empty`].
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct BookDraft {
    id: Option<BookId>,
    owner_id: OwnerId,
    title: Option<BookTitle>,
    author: Option<BookAuthor>,
    page_count: BookPageCount,
}

/// What an upsert of a [`BookDraft`] asks the store to do.
///
/// `Overwrite` and `Discard` only take effect when a row with the same
/// identifier exists for the same owner. Otherwise the upsert yields nothing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UpsertIntent {
    Skip,
    Create,
    Overwrite(BookId),
    Discard(BookId),
}

impl BookDraft {
    pub fn new(
        id: Option<BookId>,
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

    /// No title, no author and zero pages.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.page_count.is_zero()
    }

    pub fn intent(&self) -> UpsertIntent {
        match (self.id, self.is_empty()) {
            (None, true) => UpsertIntent::Skip,
            (None, false) => UpsertIntent::Create,
            (Some(id), true) => UpsertIntent::Discard(id),
            (Some(id), false) => UpsertIntent::Overwrite(id),
        }
    }

    pub fn with_owner(self, owner_id: OwnerId) -> Self {
        Self { owner_id, ..self }
    }

    pub fn into_book(self, id: BookId) -> Book {
        let DestructBookDraft {
            owner_id,
            title,
            author,
            page_count,
            ..
        } = self.into_destruct();
        Book::new(id, owner_id, title, author, page_count)
    }
}
