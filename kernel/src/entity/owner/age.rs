use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct OwnerAge(i32);

impl OwnerAge {
    pub fn new(age: impl Into<i32>) -> Self {
        Self(age.into())
    }
}
