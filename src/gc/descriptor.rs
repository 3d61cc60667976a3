use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    gc::GcRule,
    util::{Result, Status},
};

/// Descriptor `kind` values.
pub mod kind {
    pub const MAX_VERSIONS: &str = "maxVersions";
    pub const MAX_AGE: &str = "maxAge";
    pub const UNION: &str = "union";
    pub const INTERSECTION: &str = "intersection";
}

/// The wire shape of a GC rule
///
/// This is the structural form a rule takes when it crosses the
/// family-administration surface: a `kind` tag plus the parameters that
/// kind requires, nested for combinators. The exact transport encoding
/// belongs to the caller; the descriptor only guarantees a stable,
/// round-trippable shape (`GcRule::from_descriptor(rule.to_descriptor())`
/// returns `rule` for every valid rule).
///
/// Serialized as camelCase JSON:
///
/// ```json
/// {
///   "kind": "union",
///   "children": [
///     {"kind": "maxAge", "ageSeconds": 0, "ageNanos": 5000000},
///     {"kind": "maxVersions", "versions": 2}
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescriptor {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_nanos: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RuleDescriptor>>,
}

impl RuleDescriptor {
    fn leaf(kind: &str) -> Self {
        RuleDescriptor {
            kind: kind.to_string(),
            versions: None,
            age_seconds: None,
            age_nanos: None,
            children: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl GcRule {
    /// The wire-shaped descriptor for this rule. Total for valid rules.
    pub fn to_descriptor(&self) -> RuleDescriptor {
        match self {
            GcRule::MaxVersions(n) => {
                let mut d = RuleDescriptor::leaf(kind::MAX_VERSIONS);
                d.versions = Some(*n);
                d
            },
            GcRule::MaxAge(age) => {
                let mut d = RuleDescriptor::leaf(kind::MAX_AGE);
                d.age_seconds = Some(age.as_secs() as i64);
                d.age_nanos = Some(age.subsec_nanos() as i32);
                d
            },
            GcRule::Union(children) => {
                let mut d = RuleDescriptor::leaf(kind::UNION);
                d.children = Some(children.iter().map(GcRule::to_descriptor).collect());
                d
            },
            GcRule::Intersection(children) => {
                let mut d = RuleDescriptor::leaf(kind::INTERSECTION);
                d.children = Some(children.iter().map(GcRule::to_descriptor).collect());
                d
            },
        }
    }

    /// Decode a descriptor back into a validated rule
    ///
    /// An unknown `kind` or a missing required parameter fails with a
    /// malformed-rule [`Status`]; a parameter that is present but violates
    /// a rule invariant (zero versions, negative or sub-millisecond age)
    /// fails with an invalid-rule one, exactly as the checked constructors
    /// would.
    pub fn from_descriptor(desc: &RuleDescriptor) -> Result<GcRule> {
        match desc.kind.as_str() {
            kind::MAX_VERSIONS => {
                let versions = desc.versions.ok_or_else(|| {
                    Status::malformed_rule("maxVersions descriptor missing `versions`")
                })?;
                GcRule::max_versions(versions)
            },
            kind::MAX_AGE => {
                if desc.age_seconds.is_none() && desc.age_nanos.is_none() {
                    return Err(Status::malformed_rule(
                        "maxAge descriptor missing `ageSeconds`/`ageNanos`",
                    ));
                }
                let seconds = desc.age_seconds.unwrap_or(0);
                let nanos = desc.age_nanos.unwrap_or(0);
                if seconds < 0 || nanos < 0 {
                    return Err(Status::malformed_rule(format!(
                        "maxAge descriptor with negative age: {seconds}s {nanos}ns"
                    )));
                }
                GcRule::max_age(Duration::new(seconds as u64, nanos as u32))
            },
            kind::UNION => {
                let children = decode_children(desc)?;
                GcRule::union(children)
            },
            kind::INTERSECTION => {
                let children = decode_children(desc)?;
                GcRule::intersection(children)
            },
            other => Err(Status::malformed_rule(format!(
                "unrecognized rule kind: {other:?}"
            ))),
        }
    }
}

fn decode_children(desc: &RuleDescriptor) -> Result<Vec<GcRule>> {
    let children = desc.children.as_ref().ok_or_else(|| {
        Status::malformed_rule(format!("{} descriptor missing `children`", desc.kind))
    })?;
    children.iter().map(GcRule::from_descriptor).collect()
}
