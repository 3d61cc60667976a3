use crate::gc::GcRule;

/// Descriptor for creating a column family
///
/// Contains the name and the optional retention rule. Used when creating
/// a table with its initial families in one call.
///
/// # Example
///
/// ```ignore
/// use tabulet::{FamilyDescriptor, GcRule, TableOptions};
///
/// let options = TableOptions {
///     families: vec![
///         FamilyDescriptor::new("follows", Some(GcRule::max_versions(2)?)),
///         FamilyDescriptor::new("raw", None), // retain forever
///     ],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyDescriptor {
    /// Name of the column family
    pub name: String,

    /// Retention rule; `None` retains every version forever
    pub rule: Option<GcRule>,
}

impl FamilyDescriptor {
    pub fn new<S: Into<String>>(name: S, rule: Option<GcRule>) -> Self {
        FamilyDescriptor {
            name: name.into(),
            rule,
        }
    }
}
