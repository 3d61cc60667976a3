/// Garbage-collection rules for column families
///
/// Every column family may carry one GC rule that decides, per cell
/// version, whether the version is still live or eligible for deletion.
/// The rule model is a closed variant type with two leaf predicates and
/// two combinators:
///
/// ```text
/// GcRule
///  ├─→ MaxVersions(n)      keep only the n most recent versions
///  ├─→ MaxAge(d)           keep a version while now - timestamp <= d
///  ├─→ Union([...])        garbage under ANY child rule
///  └─→ Intersection([...]) garbage under ALL child rules
/// ```
///
/// Evaluation is a pure function of `(rule, cell, now)` — the clock is
/// always injected, so decisions are reproducible and the module is safe
/// to call from any number of threads without coordination.
///
/// # Usage
///
/// ```ignore
/// use std::time::Duration;
/// use tabulet::{CellVersion, GcRule, Timestamp};
///
/// let rule = GcRule::intersection(vec![
///     GcRule::max_versions(2)?,
///     GcRule::max_age(Duration::from_millis(5))?,
/// ])?;
///
/// let now = Timestamp::from_millis(100);
/// let cell = CellVersion::new(3, Timestamp::from_millis(90));
/// assert!(rule.is_garbage(&cell, now));
/// ```
///
/// Rules cross the process boundary as [`RuleDescriptor`], a stable
/// structural shape the table-administration surface consumes; see
/// [`GcRule::to_descriptor`] and [`GcRule::from_descriptor`].
pub mod config;
pub mod descriptor;
pub mod rule;
pub mod timestamp;

pub use config::{Combine, RuleConfig};
pub use descriptor::RuleDescriptor;
pub use rule::{CellVersion, GcRule, MIN_AGE};
pub use timestamp::Timestamp;
