pub use self::{book::*, owner::*, owner_books::*};

mod book;
mod owner;
mod owner_books;
