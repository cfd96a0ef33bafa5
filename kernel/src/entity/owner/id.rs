use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct OwnerId(i64);

impl OwnerId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}
