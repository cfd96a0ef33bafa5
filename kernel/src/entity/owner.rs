mod age;
mod full_name;
mod id;
mod title;

pub use self::{age::*, full_name::*, id::*, title::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Owner {
    id: OwnerId,
    title: OwnerTitle,
    full_name: OwnerFullName,
    age: OwnerAge,
}

impl Owner {
    pub fn new(id: OwnerId, title: OwnerTitle, full_name: OwnerFullName, age: OwnerAge) -> Self {
        Self {
            id,
            title,
            full_name,
            age,
        }
    }
}

/// Owner fields before the store has assigned an identifier.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct OwnerDraft {
    title: OwnerTitle,
    full_name: OwnerFullName,
    age: OwnerAge,
}

impl OwnerDraft {
    pub fn new(title: OwnerTitle, full_name: OwnerFullName, age: OwnerAge) -> Self {
        Self {
            title,
            full_name,
            age,
        }
    }

    pub fn into_owner(self, id: OwnerId) -> Owner {
        let DestructOwnerDraft {
            title,
            full_name,
            age,
        } = self.into_destruct();
        Owner::new(id, title, full_name, age)
    }
}
