pub use self::owner_books::*;

mod owner_books;

#[cfg(test)]
mod scenario;
