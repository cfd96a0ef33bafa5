pub use crate::error::*;

mod database;
mod entity;
mod error;
mod store;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod database {
        pub use crate::database::*;
    }
    pub mod store {
        pub use crate::store::*;
    }
}
