use std::ops::Bound;

/// Which rows a scan visits
///
/// Results always come back in key order, whichever selector is used, and
/// every returned row is the live view under the same read options as a
/// single-row read.
///
/// # Example
///
/// ```ignore
/// use tabulet::{ReadOptions, Scan};
///
/// // Non-contiguous row keys
/// let rows = table.scan(&Scan::keys(["key-one", "key-two"]), &ReadOptions::default());
///
/// // Everything under a key prefix
/// let rows = table.scan(&Scan::prefix("keypre"), &ReadOptions::default());
///
/// // Half-open key range [start, end)
/// let rows = table.scan(&Scan::range(Some("a"), Some("m")), &ReadOptions::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// Every row in the table.
    All,
    /// An explicit set of row keys; missing keys are skipped.
    Keys(Vec<String>),
    /// All rows whose key starts with the prefix.
    Prefix(String),
    /// All rows matching any of the prefixes.
    Prefixes(Vec<String>),
    /// Half-open key range: `start` inclusive (unbounded if `None`),
    /// `end` exclusive (unbounded if `None`).
    Range {
        start: Option<String>,
        end: Option<String>,
    },
}

impl Scan {
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scan::Keys(keys.into_iter().map(Into::into).collect())
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Scan::Prefix(prefix.into())
    }

    pub fn prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scan::Prefixes(prefixes.into_iter().map(Into::into).collect())
    }

    pub fn range(start: Option<&str>, end: Option<&str>) -> Self {
        Scan::Range {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    pub(crate) fn range_bounds(start: &Option<String>, end: &Option<String>) -> (Bound<String>, Bound<String>) {
        let lower = match start {
            Some(s) => Bound::Included(s.clone()),
            None => Bound::Unbounded,
        };
        let upper = match end {
            Some(e) => Bound::Excluded(e.clone()),
            None => Bound::Unbounded,
        };
        (lower, upper)
    }
}
