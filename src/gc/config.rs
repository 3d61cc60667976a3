use std::time::Duration;

use crate::{
    gc::GcRule,
    util::{Result, Status},
};

/// How a dual-bound [`RuleConfig`] combines its age and version bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    /// Garbage when EITHER bound is exceeded.
    Union,
    /// Garbage only when BOTH bounds are exceeded.
    Intersection,
}

/// Declarative shape for the common rule configurations
///
/// Admin callers usually describe a retention policy as "keep n versions",
/// "keep for d", or both bounds joined by a combinator, rather than
/// building a [`GcRule`] tree by hand. `RuleConfig` is that shape made
/// explicit:
///
/// ```ignore
/// use std::time::Duration;
/// use tabulet::RuleConfig;
///
/// // Drop cells older than 5ms OR beyond the most recent 2 versions.
/// let rule = RuleConfig::new()
///     .versions(2)
///     .age(Duration::from_millis(5))
///     .union()
///     .build()?;
/// ```
///
/// A config carrying both bounds MUST say how they combine. Leaving the
/// combinator out is rejected with an invalid-rule error rather than
/// resolved by a precedence guess — age-wins and versions-wins are both
/// defensible readings, and a retention policy is the wrong place to
/// guess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConfig {
    pub versions: Option<u32>,
    pub age: Option<Duration>,
    pub combine: Option<Combine>,
}

impl RuleConfig {
    pub fn new() -> Self {
        RuleConfig::default()
    }

    /// Retain only the `n` most recent versions.
    pub fn versions(mut self, n: u32) -> Self {
        self.versions = Some(n);
        self
    }

    /// Retain versions no older than `age`.
    pub fn age(mut self, age: Duration) -> Self {
        self.age = Some(age);
        self
    }

    /// Combine both bounds with OR semantics.
    pub fn union(mut self) -> Self {
        self.combine = Some(Combine::Union);
        self
    }

    /// Combine both bounds with AND semantics.
    pub fn intersection(mut self) -> Self {
        self.combine = Some(Combine::Intersection);
        self
    }

    /// Resolve to a validated [`GcRule`]
    ///
    /// - a single bound with no combinator becomes the bare leaf rule
    ///   (never wrapped in a one-child combinator);
    /// - both bounds with a combinator become
    ///   `Union([MaxAge, MaxVersions])` or
    ///   `Intersection([MaxAge, MaxVersions])`;
    /// - both bounds WITHOUT a combinator are rejected;
    /// - a combinator without both bounds is rejected;
    /// - an empty config is rejected.
    pub fn build(self) -> Result<GcRule> {
        let version_rule = self.versions.map(GcRule::max_versions).transpose()?;
        let age_rule = self.age.map(GcRule::max_age).transpose()?;

        match (age_rule, version_rule, self.combine) {
            (Some(age), Some(versions), Some(Combine::Union)) => {
                GcRule::union(vec![age, versions])
            },
            (Some(age), Some(versions), Some(Combine::Intersection)) => {
                GcRule::intersection(vec![age, versions])
            },
            (Some(_), Some(_), None) => Err(Status::invalid_rule(
                "both age and versions set: specify union() or intersection()",
            )),
            (Some(age), None, None) => Ok(age),
            (None, Some(versions), None) => Ok(versions),
            (_, _, Some(_)) => Err(Status::invalid_rule(
                "a combinator requires both an age and a versions bound",
            )),
            (None, None, None) => Err(Status::invalid_rule(
                "empty rule config: set an age and/or versions bound",
            )),
        }
    }
}
