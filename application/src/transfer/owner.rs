use error_stack::Report;

use kernel::prelude::entity::{
    DestructOwner, Owner, OwnerAge, OwnerDraft, OwnerFullName, OwnerId, OwnerTitle,
};
use kernel::KernelError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OwnerDto {
    pub id: i64,
    pub title: String,
    pub full_name: String,
    pub age: i32,
}

impl From<Owner> for OwnerDto {
    fn from(value: Owner) -> Self {
        let DestructOwner {
            id,
            title,
            full_name,
            age,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            full_name: full_name.into(),
            age: age.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateOwnerDto {
    pub title: String,
    pub full_name: String,
    pub age: i32,
}

#[derive(Debug, Clone)]
pub struct UpdateOwnerDto {
    pub id: Option<i64>,
    pub title: String,
    pub full_name: String,
    pub age: i32,
}

fn age(age: i32) -> error_stack::Result<OwnerAge, KernelError> {
    if age < 0 {
        return Err(Report::new(KernelError::InvalidInput)
            .attach_printable(format!("Owner age must not be negative: {age}")));
    }
    Ok(OwnerAge::new(age))
}

impl TryFrom<CreateOwnerDto> for OwnerDraft {
    type Error = Report<KernelError>;
    fn try_from(value: CreateOwnerDto) -> Result<Self, Self::Error> {
        Ok(OwnerDraft::new(
            OwnerTitle::new(value.title),
            OwnerFullName::new(value.full_name),
            age(value.age)?,
        ))
    }
}

impl TryFrom<UpdateOwnerDto> for Owner {
    type Error = Report<KernelError>;
    fn try_from(value: UpdateOwnerDto) -> Result<Self, Self::Error> {
        let id = value.id.ok_or_else(|| {
            Report::new(KernelError::InvalidRequest).attach_printable("Owner id is missing")
        })?;
        Ok(Owner::new(
            OwnerId::new(id),
            OwnerTitle::new(value.title),
            OwnerFullName::new(value.full_name),
            age(value.age)?,
        ))
    }
}
