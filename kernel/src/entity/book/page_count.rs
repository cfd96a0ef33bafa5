use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookPageCount(i64);

impl BookPageCount {
    pub fn new(count: impl Into<i64>) -> Self {
        Self(count.into())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}
