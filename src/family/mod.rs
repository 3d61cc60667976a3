/// Column families
///
/// A column family is a named grouping of columns within a table; every
/// column in the family shares the family's garbage-collection rule. Each
/// family has independent:
/// - Identity (id + name, unique within its table)
/// - Retention policy (one optional [`GcRule`](crate::GcRule); absence
///   means retain forever)
///
/// # Architecture
///
/// ```text
/// Table
///  ├─→ FamilySet
///  │    ├─→ ColumnFamily("follows")   rule: MaxVersions(2)
///  │    ├─→ ColumnFamily("stats")     rule: MaxAge(30d)
///  │    └─→ ColumnFamily("raw")       rule: none (retain forever)
///  └─→ rows ...
/// ```
///
/// # Lifecycle
///
/// ```text
/// create_family → rule attached (optional)
///       ↓
/// set_rule → rule REPLACED wholesale (never merged with the old rule)
///       ↓
/// drop_family → family and its cells gone
/// ```
mod family;
pub mod family_descriptor;
pub mod family_handle;
pub mod family_set;

pub use family::ColumnFamily;
pub use family_descriptor::FamilyDescriptor;
pub use family_handle::FamilyHandle;
pub use family_set::FamilySet;
