use crate::{
    family::FamilyHandle,
    gc::{GcRule, RuleDescriptor},
    table::Table,
    util::Result,
};

/// The family-administration contract, typed over the wire descriptor
///
/// This is the surface an out-of-process admin caller programs against:
/// rules cross it as [`RuleDescriptor`] values and are decoded (and
/// validated) on the way in, so a malformed or invalid rule is rejected
/// before it can touch a family. Every operation returns an explicit
/// `Result` — there is no callback path and no partial success.
///
/// [`Table`] implements the trait; its inherent methods offer the same
/// operations typed over [`GcRule`](crate::GcRule) for in-process
/// callers.
pub trait FamilyAdmin {
    /// Create a column family. `rule: None` retains every version
    /// forever.
    fn create_family(&self, family: &str, rule: Option<&RuleDescriptor>) -> Result<FamilyHandle>;

    /// Get the family, creating it with `rule` if absent. An existing
    /// family keeps its current rule.
    fn ensure_family(&self, family: &str, rule: Option<&RuleDescriptor>) -> Result<FamilyHandle>;

    /// REPLACE the family's rule. The previous rule is discarded, never
    /// merged with the new one.
    fn set_family_rule(&self, family: &str, rule: Option<&RuleDescriptor>) -> Result<()>;

    /// The family's current rule as a descriptor; `Ok(None)` means retain
    /// forever.
    fn family_rule(&self, family: &str) -> Result<Option<RuleDescriptor>>;

    /// Delete the family and every cell stored under it.
    fn delete_family(&self, family: &str) -> Result<()>;

    /// All families, in creation order.
    fn list_families(&self) -> Vec<FamilyHandle>;
}

fn decode(rule: Option<&RuleDescriptor>) -> Result<Option<GcRule>> {
    rule.map(GcRule::from_descriptor).transpose()
}

impl FamilyAdmin for Table {
    fn create_family(&self, family: &str, rule: Option<&RuleDescriptor>) -> Result<FamilyHandle> {
        Table::create_family(self, family, decode(rule)?)
    }

    fn ensure_family(&self, family: &str, rule: Option<&RuleDescriptor>) -> Result<FamilyHandle> {
        Table::ensure_family(self, family, decode(rule)?)
    }

    fn set_family_rule(&self, family: &str, rule: Option<&RuleDescriptor>) -> Result<()> {
        Table::set_family_rule(self, family, decode(rule)?)
    }

    fn family_rule(&self, family: &str) -> Result<Option<RuleDescriptor>> {
        Ok(Table::family_rule(self, family)?.map(|rule| rule.to_descriptor()))
    }

    fn delete_family(&self, family: &str) -> Result<()> {
        Table::delete_family(self, family)
    }

    fn list_families(&self) -> Vec<FamilyHandle> {
        Table::list_families(self)
    }
}
