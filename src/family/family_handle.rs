/// Handle to a column family
///
/// A lightweight reference returned by the admin surface. The handle
/// carries identity only; the rule lives on the family itself and is read
/// through the owning table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FamilyHandle {
    pub(crate) id: u32,
    pub(crate) name: String,
}

impl FamilyHandle {
    pub(crate) fn new(id: u32, name: String) -> Self {
        FamilyHandle { id, name }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
