use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use application::transfer::{BookDto, OwnerWithBooksDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: i64,
    owner_id: i64,
    title: Option<String>,
    author: Option<String>,
    page_count: i64,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            owner_id: value.owner_id,
            title: value.title,
            author: value.author,
            page_count: value.page_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    id: i64,
    title: String,
    full_name: String,
    age: i32,
    books: Vec<BookResponse>,
}

impl IntoResponse for OwnerResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct OwnerPresenter;

impl Exhaust<OwnerWithBooksDto> for OwnerPresenter {
    type To = OwnerResponse;
    fn emit(&self, input: OwnerWithBooksDto) -> Self::To {
        let OwnerWithBooksDto { owner, books } = input;
        OwnerResponse {
            id: owner.id,
            title: owner.title,
            full_name: owner.full_name,
            age: owner.age,
            books: books.into_iter().map(BookResponse::from).collect(),
        }
    }
}

impl Exhaust<()> for OwnerPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
