use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct OwnerFullName(String);

impl OwnerFullName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
