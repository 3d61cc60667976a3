use std::collections::BTreeMap;

use crate::{
    gc::{CellVersion, GcRule, Timestamp},
    table::Cell,
};

/// Columns of one family within a row: qualifier → versions, newest first.
pub type FamilyColumns = BTreeMap<String, Vec<Cell>>;

/// Stored state of one row
///
/// Holds every written version, garbage included — rank and age are
/// re-evaluated against the family rule on each read, and versions are
/// only physically dropped by a sweep.
#[derive(Debug, Default, Clone)]
pub struct Row {
    families: BTreeMap<String, FamilyColumns>,
}

impl Row {
    pub(crate) fn new() -> Self {
        Row::default()
    }

    /// Insert a cell, keeping the column's versions sorted newest-first.
    /// A write at an existing timestamp replaces that version's value.
    pub(crate) fn put_cell(&mut self, family: &str, qualifier: &str, cell: Cell) {
        let versions = self
            .families
            .entry(family.to_string())
            .or_default()
            .entry(qualifier.to_string())
            .or_default();

        match versions.binary_search_by(|c| cell.timestamp.cmp(&c.timestamp)) {
            Ok(pos) => versions[pos] = cell,
            Err(pos) => versions.insert(pos, cell),
        }
    }

    pub(crate) fn drop_family(&mut self, family: &str) -> usize {
        self.families
            .remove(family)
            .map(|columns| columns.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    pub(crate) fn families_mut(&mut self) -> &mut BTreeMap<String, FamilyColumns> {
        &mut self.families
    }

    #[allow(dead_code)]
    pub(crate) fn families(&self) -> &BTreeMap<String, FamilyColumns> {
        &self.families
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// The live view of this row under the given per-family rules
    ///
    /// `rules` maps family name → its current rule (`None` = retain
    /// forever); families absent from the map are treated as deleted and
    /// skipped. `cell_limit` caps the number of live versions returned
    /// per column, newest first — a read filter, not a retention
    /// decision. Returns `None` when nothing in the row is visible.
    pub(crate) fn live_view(
        &self,
        key: &str,
        rules: &BTreeMap<String, Option<GcRule>>,
        now: Timestamp,
        cell_limit: Option<usize>,
    ) -> Option<RowView> {
        let mut view_families = BTreeMap::new();

        for (family, columns) in &self.families {
            let Some(rule) = rules.get(family) else {
                continue;
            };

            let mut view_columns = BTreeMap::new();
            for (qualifier, versions) in columns {
                let mut live: Vec<Cell> = versions
                    .iter()
                    .enumerate()
                    .filter(|(i, cell)| match rule {
                        Some(rule) => !rule.is_garbage(
                            &CellVersion::new(*i as u32 + 1, cell.timestamp),
                            now,
                        ),
                        None => true,
                    })
                    .map(|(_, cell)| cell.clone())
                    .collect();

                if let Some(limit) = cell_limit {
                    live.truncate(limit);
                }
                if !live.is_empty() {
                    view_columns.insert(qualifier.clone(), live);
                }
            }

            if !view_columns.is_empty() {
                view_families.insert(family.clone(), view_columns);
            }
        }

        if view_families.is_empty() {
            return None;
        }
        Some(RowView {
            key: key.to_string(),
            families: view_families,
        })
    }
}

/// A row as a reader sees it: live cells only, GC and read filters applied
///
/// Owned snapshot — safe to hold after the read returns, unaffected by
/// later writes or rule changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub key: String,
    /// family → qualifier → live versions, newest first
    pub families: BTreeMap<String, FamilyColumns>,
}

impl RowView {
    /// The most recent live cell of one column, if any.
    pub fn cell(&self, family: &str, qualifier: &str) -> Option<&Cell> {
        self.families.get(family)?.get(qualifier)?.first()
    }

    /// All live versions of one column, newest first.
    pub fn cells(&self, family: &str, qualifier: &str) -> &[Cell] {
        self.families
            .get(family)
            .and_then(|columns| columns.get(qualifier))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
