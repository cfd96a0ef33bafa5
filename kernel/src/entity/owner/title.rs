use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct OwnerTitle(String);

impl OwnerTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }
}
