use std::time::Duration;

use crate::{
    gc::Timestamp,
    util::{Result, Status},
};

/// Minimum granularity of an age bound. Ages below this are rejected,
/// never rounded up.
pub const MIN_AGE: Duration = Duration::from_millis(1);

/// The cell fields garbage collection looks at
///
/// `rank` is the 1-based recency order of this version among all versions
/// of the same (row, family, qualifier): 1 = most recently written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellVersion {
    pub rank: u32,
    pub timestamp: Timestamp,
}

impl CellVersion {
    pub fn new(rank: u32, timestamp: Timestamp) -> Self {
        CellVersion { rank, timestamp }
    }
}

/// A cell-retention policy for one column family
///
/// The variants are public so consumers can match on the tree (the sweep
/// path and tests do), but the checked constructors are the supported way
/// to build one: they reject invariant violations with an invalid-rule
/// [`Status`] instead of clamping. Everything that accepts a rule from
/// outside the process ([`GcRule::from_descriptor`], the family-admin
/// surface) routes through them, so an invalid tree never reaches the
/// evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GcRule {
    /// Retain only the `n` most recent versions; rank `n+1` and beyond
    /// are garbage.
    MaxVersions(u32),
    /// Retain a version while `now - timestamp <= d`. The boundary is
    /// retained: a version aged exactly `d` is live.
    MaxAge(Duration),
    /// Garbage under ANY child rule.
    Union(Vec<GcRule>),
    /// Garbage under ALL child rules.
    Intersection(Vec<GcRule>),
}

impl GcRule {
    /// Retain only the `n` most recent versions. `n` must be >= 1.
    pub fn max_versions(n: u32) -> Result<Self> {
        if n == 0 {
            return Err(Status::invalid_rule("max_versions must be >= 1"));
        }
        Ok(GcRule::MaxVersions(n))
    }

    /// Retain versions no older than `age`. `age` must be >= 1ms.
    pub fn max_age(age: Duration) -> Result<Self> {
        if age < MIN_AGE {
            return Err(Status::invalid_rule(format!(
                "max_age must be >= 1ms, got {age:?}"
            )));
        }
        Ok(GcRule::MaxAge(age))
    }

    /// A version is garbage if ANY child rule says so. At least one child
    /// is required.
    pub fn union(children: Vec<GcRule>) -> Result<Self> {
        if children.is_empty() {
            return Err(Status::invalid_rule("union requires at least one child"));
        }
        Ok(GcRule::Union(children))
    }

    /// A version is garbage only if ALL child rules say so. At least one
    /// child is required.
    pub fn intersection(children: Vec<GcRule>) -> Result<Self> {
        if children.is_empty() {
            return Err(Status::invalid_rule(
                "intersection requires at least one child",
            ));
        }
        Ok(GcRule::Intersection(children))
    }

    /// Re-checks every invariant over the whole tree. Used by surfaces
    /// that accept a `GcRule` value built without the checked
    /// constructors.
    pub fn validate(&self) -> Result<()> {
        match self {
            GcRule::MaxVersions(n) => {
                if *n == 0 {
                    return Err(Status::invalid_rule("max_versions must be >= 1"));
                }
            },
            GcRule::MaxAge(age) => {
                if *age < MIN_AGE {
                    return Err(Status::invalid_rule(format!(
                        "max_age must be >= 1ms, got {age:?}"
                    )));
                }
            },
            GcRule::Union(children) | GcRule::Intersection(children) => {
                if children.is_empty() {
                    return Err(Status::invalid_rule("combinator requires at least one child"));
                }
                for child in children {
                    child.validate()?;
                }
            },
        }
        Ok(())
    }

    /// Whether `cell` is garbage under this rule at time `now`
    ///
    /// Pure and total: no clock reads, no allocation, deterministic for a
    /// given `(rule, cell, now)`. Combinator children are visited left to
    /// right and short-circuit.
    pub fn is_garbage(&self, cell: &CellVersion, now: Timestamp) -> bool {
        match self {
            GcRule::MaxVersions(n) => cell.rank > *n,
            GcRule::MaxAge(age) => now.saturating_duration_since(cell.timestamp) > *age,
            GcRule::Union(children) => children.iter().any(|c| c.is_garbage(cell, now)),
            GcRule::Intersection(children) => children.iter().all(|c| c.is_garbage(cell, now)),
        }
    }
}
