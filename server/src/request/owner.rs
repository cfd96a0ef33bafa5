use serde::Deserialize;

use application::transfer::{
    CreateBookDto, CreateOwnerDto, CreateOwnerWithBooksDto, DeleteOwnerWithBooksDto,
    GetOwnerWithBooksDto, UpdateBookDto, UpdateOwnerDto, UpdateOwnerWithBooksDto,
};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateOwnerPayload {
    title: String,
    full_name: String,
    age: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookPayload {
    title: Option<String>,
    author: Option<String>,
    #[serde(default)]
    page_count: i64,
}

/// Absent members become absent payloads and are rejected further down.
#[derive(Debug, Deserialize)]
pub struct CreateOwnerRequest {
    owner: Option<CreateOwnerPayload>,
    #[serde(default)]
    books: Vec<Option<CreateBookPayload>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOwnerPayload {
    id: Option<i64>,
    title: String,
    full_name: String,
    age: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookPayload {
    id: Option<i64>,
    title: Option<String>,
    author: Option<String>,
    #[serde(default)]
    page_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOwnerRequest {
    owner: Option<UpdateOwnerPayload>,
    #[serde(default)]
    books: Vec<Option<UpdateBookPayload>>,
}

#[derive(Debug)]
pub struct GetOwnerRequest {
    id: i64,
}

impl GetOwnerRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteOwnerRequest {
    id: i64,
}

impl DeleteOwnerRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

pub struct OwnerTransformer;

impl Intake<CreateOwnerRequest> for OwnerTransformer {
    type To = CreateOwnerWithBooksDto;
    fn emit(&self, input: CreateOwnerRequest) -> Self::To {
        let owner = input.owner.map(|owner| CreateOwnerDto {
            title: owner.title,
            full_name: owner.full_name,
            age: owner.age,
        });
        let books = input
            .books
            .into_iter()
            .map(|book| {
                book.map(|book| CreateBookDto {
                    title: book.title,
                    author: book.author,
                    page_count: book.page_count,
                })
            })
            .collect();
        CreateOwnerWithBooksDto { owner, books }
    }
}

impl Intake<UpdateOwnerRequest> for OwnerTransformer {
    type To = UpdateOwnerWithBooksDto;
    fn emit(&self, input: UpdateOwnerRequest) -> Self::To {
        let owner = input.owner.map(|owner| UpdateOwnerDto {
            id: owner.id,
            title: owner.title,
            full_name: owner.full_name,
            age: owner.age,
        });
        let books = input
            .books
            .into_iter()
            .map(|book| {
                book.map(|book| UpdateBookDto {
                    id: book.id,
                    title: book.title,
                    author: book.author,
                    page_count: book.page_count,
                })
            })
            .collect();
        UpdateOwnerWithBooksDto { owner, books }
    }
}

impl Intake<GetOwnerRequest> for OwnerTransformer {
    type To = GetOwnerWithBooksDto;
    fn emit(&self, input: GetOwnerRequest) -> Self::To {
        GetOwnerWithBooksDto { id: Some(input.id) }
    }
}

impl Intake<DeleteOwnerRequest> for OwnerTransformer {
    type To = DeleteOwnerWithBooksDto;
    fn emit(&self, input: DeleteOwnerRequest) -> Self::To {
        DeleteOwnerWithBooksDto { id: Some(input.id) }
    }
}
