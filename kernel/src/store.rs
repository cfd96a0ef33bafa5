mod book;
mod owner;

pub use self::{book::*, owner::*};
