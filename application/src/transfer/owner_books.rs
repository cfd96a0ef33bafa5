use kernel::prelude::entity::{Book, Owner};

use crate::transfer::{
    BookDto, CreateBookDto, CreateOwnerDto, OwnerDto, UpdateBookDto, UpdateOwnerDto,
};

/// An owner together with the books that belong to it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OwnerWithBooksDto {
    pub owner: OwnerDto,
    pub books: Vec<BookDto>,
}

impl OwnerWithBooksDto {
    /// Every book is stamped with the owner's id.
    pub fn new(owner: Owner, books: Vec<Book>) -> Self {
        let owner = OwnerDto::from(owner);
        let books = books
            .into_iter()
            .map(BookDto::from)
            .map(|book| BookDto {
                owner_id: owner.id,
                ..book
            })
            .collect();
        Self { owner, books }
    }
}

#[derive(Debug, Clone)]
pub struct CreateOwnerWithBooksDto {
    pub owner: Option<CreateOwnerDto>,
    pub books: Vec<Option<CreateBookDto>>,
}

#[derive(Debug, Clone)]
pub struct UpdateOwnerWithBooksDto {
    pub owner: Option<UpdateOwnerDto>,
    pub books: Vec<Option<UpdateBookDto>>,
}

#[derive(Debug, Clone)]
pub struct GetOwnerWithBooksDto {
    pub id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct DeleteOwnerWithBooksDto {
    pub id: Option<i64>,
}
