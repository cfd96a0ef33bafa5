pub use self::owner::*;

mod owner;
