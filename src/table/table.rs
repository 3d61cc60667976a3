use std::collections::{BTreeMap, BTreeSet};

use bytes::Bytes;
use parking_lot::RwLock;

use crate::{
    family::{FamilyDescriptor, FamilyHandle, FamilySet},
    gc::{GcRule, Timestamp},
    table::{Cell, Row, RowView, Scan},
    util::{Result, Status},
};

#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Families to create together with the table
    pub families: Vec<FamilyDescriptor>,
}

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Keep at most this many live versions per column, newest first.
    /// Applied after GC filtering; `None` returns every live version.
    pub cell_limit: Option<usize>,

    /// The instant GC rules are evaluated against. `None` stamps the
    /// wall clock when the read enters the table.
    pub now: Option<Timestamp>,
}

/// One cell write within a bulk insert.
#[derive(Debug, Clone)]
pub struct Entry {
    pub key: String,
    pub family: String,
    pub qualifier: String,
    pub timestamp: Timestamp,
    pub value: Bytes,
}

impl Entry {
    pub fn new<K, F, Q>(
        key: K,
        family: F,
        qualifier: Q,
        timestamp: Timestamp,
        value: impl Into<Bytes>,
    ) -> Self
    where
        K: Into<String>,
        F: Into<String>,
        Q: Into<String>,
    {
        Entry {
            key: key.into(),
            family: family.into(),
            qualifier: qualifier.into(),
            timestamp,
            value: value.into(),
        }
    }
}

/// A failed entry from a bulk insert: which one, and why.
#[derive(Debug, Clone)]
pub struct EntryError {
    pub index: usize,
    pub status: Status,
}

/// An in-memory wide-column table
///
/// Rows are kept sorted by key. Writes store every version; reads apply
/// the owning family's current GC rule (and any read filter) so callers
/// only ever see live cells. Physical deletion is the
/// [`Sweeper`](crate::sweep::Sweeper)'s job.
///
/// All operations take `&self`; interior locks make the table safe to
/// share across threads behind an `Arc`.
#[derive(Debug)]
pub struct Table {
    name: String,
    families: FamilySet,
    rows: RwLock<BTreeMap<String, Row>>,
}

impl Table {
    pub fn new(name: impl Into<String>, options: TableOptions) -> Result<Self> {
        Ok(Table {
            name: name.into(),
            families: FamilySet::with_families(&options.families)?,
            rows: RwLock::new(BTreeMap::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ---- family administration ----

    /// Create a column family with an optional retention rule.
    pub fn create_family(&self, family: &str, rule: Option<GcRule>) -> Result<FamilyHandle> {
        self.families.create(family, rule)
    }

    /// Get the family's handle, creating the family (with `rule`) if it
    /// does not exist yet. An existing family keeps its current rule.
    pub fn ensure_family(&self, family: &str, rule: Option<GcRule>) -> Result<FamilyHandle> {
        Ok(self.families.get_or_create(family, rule)?.handle())
    }

    pub fn family_exists(&self, family: &str) -> bool {
        self.families.exists(family)
    }

    /// Current retention rule of a family. `Ok(None)` means the family
    /// exists and retains forever.
    pub fn family_rule(&self, family: &str) -> Result<Option<GcRule>> {
        self.families
            .get(family)
            .map(|f| f.rule())
            .ok_or_else(|| Status::not_found(format!("no such family: {family}")))
    }

    /// Replace a family's rule wholesale
    ///
    /// The new rule does NOT compose with the old one: after this call
    /// the family is governed by `rule` alone. `None` clears the policy.
    pub fn set_family_rule(&self, family: &str, rule: Option<GcRule>) -> Result<()> {
        if let Some(rule) = &rule {
            rule.validate()?;
        }
        let f = self
            .families
            .get(family)
            .ok_or_else(|| Status::not_found(format!("no such family: {family}")))?;
        f.set_rule(rule);
        Ok(())
    }

    /// Delete a family and every cell stored under it.
    pub fn delete_family(&self, family: &str) -> Result<()> {
        self.families.drop_family(family)?;

        let mut rows = self.rows.write();
        rows.retain(|_, row| {
            row.drop_family(family);
            !row.is_empty()
        });
        Ok(())
    }

    /// All family handles, in creation order.
    pub fn list_families(&self) -> Vec<FamilyHandle> {
        self.families.list()
    }

    // ---- writes ----

    /// Write one cell version. The caller supplies the timestamp; writing
    /// an existing (row, family, qualifier, timestamp) replaces that
    /// version's value.
    pub fn put(
        &self,
        key: &str,
        family: &str,
        qualifier: &str,
        timestamp: Timestamp,
        value: impl Into<Bytes>,
    ) -> Result<()> {
        if key.is_empty() {
            return Err(Status::invalid_argument("row key must not be empty"));
        }
        if !self.families.exists(family) {
            return Err(Status::not_found(format!("no such family: {family}")));
        }

        let mut rows = self.rows.write();
        rows.entry(key.to_string())
            .or_insert_with(Row::new)
            .put_cell(family, qualifier, Cell::new(timestamp, value));
        Ok(())
    }

    /// Bulk write. Entries are applied independently: valid entries land
    /// even when others fail, and the failed subset comes back as
    /// `(index, status)` pairs. An empty result means every entry was
    /// written.
    pub fn insert(&self, entries: Vec<Entry>) -> Vec<EntryError> {
        let mut failed = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            if let Err(status) = self.put(
                &entry.key,
                &entry.family,
                &entry.qualifier,
                entry.timestamp,
                entry.value,
            ) {
                failed.push(EntryError { index, status });
            }
        }
        failed
    }

    /// Remove a row and all its cells. Returns whether the row existed.
    pub fn delete_row(&self, key: &str) -> bool {
        self.rows.write().remove(key).is_some()
    }

    /// Remove every cell one row holds under `family`, leaving the
    /// family itself (and the row's other families) untouched. Returns
    /// whether any cells were removed.
    pub fn delete_family_cells(&self, key: &str, family: &str) -> Result<bool> {
        if !self.families.exists(family) {
            return Err(Status::not_found(format!("no such family: {family}")));
        }

        let mut rows = self.rows.write();
        let Some(row) = rows.get_mut(key) else {
            return Ok(false);
        };
        let removed = row.drop_family(family) > 0;
        if row.is_empty() {
            rows.remove(key);
        }
        Ok(removed)
    }

    // ---- reads ----

    /// The live view of one row, or `None` if the row is absent or
    /// nothing in it survives GC filtering.
    pub fn read_row(&self, key: &str, options: &ReadOptions) -> Option<RowView> {
        let now = options.now.unwrap_or_else(Timestamp::now);
        let rules = self.family_rules();

        let rows = self.rows.read();
        rows.get(key)
            .and_then(|row| row.live_view(key, &rules, now, options.cell_limit))
    }

    /// Scan rows in key order. Rows with no live cells are skipped.
    pub fn scan(&self, scan: &Scan, options: &ReadOptions) -> Vec<RowView> {
        let now = options.now.unwrap_or_else(Timestamp::now);
        let rules = self.family_rules();
        let rows = self.rows.read();

        let view = |key: &String, row: &Row| row.live_view(key, &rules, now, options.cell_limit);

        match scan {
            Scan::All => rows.iter().filter_map(|(k, r)| view(k, r)).collect(),
            Scan::Keys(keys) => {
                let wanted: BTreeSet<&String> = keys.iter().collect();
                wanted
                    .into_iter()
                    .filter_map(|k| rows.get(k).and_then(|r| view(k, r)))
                    .collect()
            },
            Scan::Prefix(prefix) => rows
                .range(prefix.clone()..)
                .take_while(|(k, _)| k.starts_with(prefix.as_str()))
                .filter_map(|(k, r)| view(k, r))
                .collect(),
            Scan::Prefixes(prefixes) => {
                let mut views: BTreeMap<String, RowView> = BTreeMap::new();
                for prefix in prefixes {
                    for (k, r) in rows
                        .range(prefix.clone()..)
                        .take_while(|(k, _)| k.starts_with(prefix.as_str()))
                    {
                        if !views.contains_key(k) {
                            if let Some(v) = view(k, r) {
                                views.insert(k.clone(), v);
                            }
                        }
                    }
                }
                views.into_values().collect()
            },
            Scan::Range { start, end } => {
                let bounds = Scan::range_bounds(start, end);
                rows.range(bounds).filter_map(|(k, r)| view(k, r)).collect()
            },
        }
    }

    /// Up to `count` row keys, approximately evenly spaced across the
    /// table in key order. Useful for splitting a scan into shards.
    pub fn sample_row_keys(&self, count: usize) -> Result<Vec<String>> {
        if count == 0 {
            return Err(Status::invalid_argument("sample count must be >= 1"));
        }

        let rows = self.rows.read();
        let total = rows.len();
        if total <= count {
            return Ok(rows.keys().cloned().collect());
        }

        let keys: Vec<&String> = rows.keys().collect();
        Ok((0..count).map(|i| keys[i * total / count].clone()).collect())
    }

    /// Number of stored rows, garbage included.
    pub fn row_count(&self) -> usize {
        self.rows.read().len()
    }

    // ---- internal access for the sweeper ----

    /// Snapshot of family name → current rule, taken once per operation
    /// so one read/sweep evaluates against one consistent rule set.
    pub(crate) fn family_rules(&self) -> BTreeMap<String, Option<GcRule>> {
        self.families
            .list()
            .into_iter()
            .filter_map(|h| self.families.get(h.name()).map(|f| (h.name().to_string(), f.rule())))
            .collect()
    }

    pub(crate) fn rows(&self) -> &RwLock<BTreeMap<String, Row>> {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_family(rule: Option<GcRule>) -> Table {
        let table = Table::new("t", TableOptions::default()).unwrap();
        table.create_family("cf1", rule).unwrap();
        table
    }

    fn opts_at(ts_millis: u64) -> ReadOptions {
        ReadOptions {
            cell_limit: None,
            now: Some(Timestamp::from_millis(ts_millis)),
        }
    }

    #[test]
    fn test_put_requires_family() {
        let table = table_with_family(None);
        let err = table
            .put("r1", "nope", "col", Timestamp::from_millis(1), "v")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_put_and_read_row() {
        let table = table_with_family(None);
        table
            .put("r1", "cf1", "col", Timestamp::from_millis(1), "v1")
            .unwrap();

        let view = table.read_row("r1", &opts_at(10)).unwrap();
        assert_eq!(view.cell("cf1", "col").unwrap().value, Bytes::from("v1"));
        assert!(table.read_row("r2", &opts_at(10)).is_none());
    }

    #[test]
    fn test_read_applies_current_rule() {
        let table = table_with_family(None);
        for ts in [1, 2, 3] {
            table
                .put("r1", "cf1", "col", Timestamp::from_millis(ts), "v")
                .unwrap();
        }

        assert_eq!(
            table.read_row("r1", &opts_at(10)).unwrap().cells("cf1", "col").len(),
            3
        );

        // Tighten the rule; the same read now sees one version.
        table
            .set_family_rule("cf1", Some(GcRule::MaxVersions(1)))
            .unwrap();
        assert_eq!(
            table.read_row("r1", &opts_at(10)).unwrap().cells("cf1", "col").len(),
            1
        );
    }

    #[test]
    fn test_insert_reports_failed_subset() {
        let table = table_with_family(None);
        let failed = table.insert(vec![
            Entry::new("r1", "cf1", "col", Timestamp::from_millis(1), "a"),
            Entry::new("r2", "ghost", "col", Timestamp::from_millis(1), "b"),
            Entry::new("r3", "cf1", "col", Timestamp::from_millis(1), "c"),
        ]);

        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].index, 1);
        assert!(failed[0].status.is_not_found());

        // The valid entries landed.
        assert!(table.read_row("r1", &opts_at(10)).is_some());
        assert!(table.read_row("r3", &opts_at(10)).is_some());
    }

    #[test]
    fn test_scan_prefix_in_key_order() {
        let table = table_with_family(None);
        for key in ["alpha", "app-2", "app-1", "banana"] {
            table
                .put(key, "cf1", "col", Timestamp::from_millis(1), "v")
                .unwrap();
        }

        let views = table.scan(&Scan::prefix("app"), &opts_at(10));
        let keys: Vec<&str> = views.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["app-1", "app-2"]);
    }

    #[test]
    fn test_scan_keys_skips_missing() {
        let table = table_with_family(None);
        table
            .put("key-one", "cf1", "col", Timestamp::from_millis(1), "v")
            .unwrap();

        let views = table.scan(&Scan::keys(["key-two", "key-one"]), &opts_at(10));
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].key, "key-one");
    }

    #[test]
    fn test_scan_range_half_open() {
        let table = table_with_family(None);
        for key in ["a", "b", "c", "d"] {
            table
                .put(key, "cf1", "col", Timestamp::from_millis(1), "v")
                .unwrap();
        }

        let views = table.scan(&Scan::range(Some("b"), Some("d")), &opts_at(10));
        let keys: Vec<&str> = views.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_sample_row_keys() {
        let table = table_with_family(None);
        for i in 0..10 {
            table
                .put(&format!("key{i}"), "cf1", "col", Timestamp::from_millis(1), "v")
                .unwrap();
        }

        let samples = table.sample_row_keys(3).unwrap();
        assert_eq!(samples.len(), 3);
        let mut sorted = samples.clone();
        sorted.sort();
        assert_eq!(samples, sorted);

        assert!(table.sample_row_keys(0).unwrap_err().is_invalid_argument());
        assert_eq!(table.sample_row_keys(100).unwrap().len(), 10);
    }

    #[test]
    fn test_delete_family_purges_cells() {
        let table = table_with_family(None);
        table.create_family("cf2", None).unwrap();
        table
            .put("r1", "cf1", "col", Timestamp::from_millis(1), "v")
            .unwrap();
        table
            .put("r1", "cf2", "col", Timestamp::from_millis(1), "v")
            .unwrap();
        table
            .put("r2", "cf1", "col", Timestamp::from_millis(1), "v")
            .unwrap();

        table.delete_family("cf1").unwrap();

        // r2 only held cf1 cells, so the whole row is gone.
        assert_eq!(table.row_count(), 1);
        let view = table.read_row("r1", &opts_at(10)).unwrap();
        assert!(view.families.contains_key("cf2"));
        assert!(!view.families.contains_key("cf1"));
    }

    #[test]
    fn test_delete_family_cells() {
        let table = table_with_family(None);
        table.create_family("cf2", None).unwrap();
        table
            .put("r1", "cf1", "col", Timestamp::from_millis(1), "v")
            .unwrap();
        table
            .put("r1", "cf2", "col", Timestamp::from_millis(1), "v")
            .unwrap();

        assert!(table.delete_family_cells("r1", "cf1").unwrap());
        assert!(!table.delete_family_cells("r1", "cf1").unwrap());
        assert!(!table.delete_family_cells("ghost-row", "cf1").unwrap());
        assert!(
            table
                .delete_family_cells("r1", "ghost")
                .unwrap_err()
                .is_not_found()
        );

        // The family still exists and accepts new writes.
        let view = table.read_row("r1", &opts_at(10)).unwrap();
        assert!(!view.families.contains_key("cf1"));
        assert!(view.families.contains_key("cf2"));
        table
            .put("r1", "cf1", "col", Timestamp::from_millis(2), "v2")
            .unwrap();
    }

    #[test]
    fn test_delete_row() {
        let table = table_with_family(None);
        table
            .put("r1", "cf1", "col", Timestamp::from_millis(1), "v")
            .unwrap();

        assert!(table.delete_row("r1"));
        assert!(!table.delete_row("r1"));
        assert!(table.read_row("r1", &opts_at(10)).is_none());
    }
}
