use parking_lot::RwLock;

use crate::{family::FamilyHandle, gc::GcRule};

/// One column family: identity plus the current retention rule
///
/// The rule slot is the only mutable state. Updating it swaps the whole
/// rule — there is no merge with the previous one — and readers always
/// evaluate against whatever rule is current at that moment.
#[derive(Debug)]
pub struct ColumnFamily {
    id: u32,
    name: String,
    rule: RwLock<Option<GcRule>>,
}

impl ColumnFamily {
    pub(crate) fn new(id: u32, name: String, rule: Option<GcRule>) -> Self {
        ColumnFamily {
            id,
            name,
            rule: RwLock::new(rule),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> FamilyHandle {
        FamilyHandle::new(self.id, self.name.clone())
    }

    /// Clone of the current rule. `None` means retain forever.
    pub fn rule(&self) -> Option<GcRule> {
        self.rule.read().clone()
    }

    /// Replace the rule wholesale, returning the previous one. Passing
    /// `None` clears the policy (retain forever).
    pub fn set_rule(&self, rule: Option<GcRule>) -> Option<GcRule> {
        std::mem::replace(&mut *self.rule.write(), rule)
    }
}
