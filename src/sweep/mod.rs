//! Physical garbage collection
//!
//! Reads already serve the live view; the sweeper is what actually
//! reclaims memory. It walks every row, re-ranks each column's versions,
//! evaluates the owning family's current rule, and drops the versions the
//! rule calls garbage. Emptied columns, families, and rows are removed.
//!
//! Large tables are swept with one rayon task per row; small tables take
//! a sequential path since the fan-out would cost more than it saves.
//!
//! ```ignore
//! use tabulet::{SweepConfig, Sweeper, Timestamp};
//!
//! let sweeper = Sweeper::new(SweepConfig::default());
//! let stats = sweeper.sweep(&table, Timestamp::now());
//! println!("dropped {} of {} cells", stats.cells_dropped, stats.cells_examined);
//! ```

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{
    gc::{CellVersion, GcRule, Timestamp},
    table::{Row, Table},
};

/// Configuration for sweep execution
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Sweep rows in parallel when the table is large enough.
    pub enable_parallel: bool,

    /// Tables with fewer rows than this are swept sequentially.
    pub min_rows_parallel: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            enable_parallel: true,
            min_rows_parallel: 32,
        }
    }
}

/// What a sweep did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub rows_visited: usize,
    pub cells_examined: usize,
    pub cells_dropped: usize,
    /// Rows removed because the sweep left them with no cells at all.
    pub rows_emptied: usize,
}

/// Result from sweeping a single row.
struct RowSweep {
    examined: usize,
    dropped: usize,
}

pub struct Sweeper {
    config: SweepConfig,
}

impl Sweeper {
    pub fn new(config: SweepConfig) -> Self {
        Sweeper { config }
    }

    /// Drop every cell that is garbage at time `now` under the current
    /// family rules. Idempotent: a second sweep at the same `now` finds
    /// nothing to drop.
    ///
    /// The table's write lock is held for the duration, so the sweep sees
    /// (and leaves) one consistent state.
    pub fn sweep(&self, table: &Table, now: Timestamp) -> SweepStats {
        let rules = table.family_rules();
        let mut rows = table.rows().write();

        let use_parallel =
            self.config.enable_parallel && rows.len() >= self.config.min_rows_parallel;

        let per_row: Vec<RowSweep> = if use_parallel {
            let row_refs: Vec<&mut Row> = rows.values_mut().collect();
            row_refs
                .into_par_iter()
                .map(|row| sweep_row(row, &rules, now))
                .collect()
        } else {
            rows.values_mut()
                .map(|row| sweep_row(row, &rules, now))
                .collect()
        };

        let mut stats = SweepStats {
            rows_visited: per_row.len(),
            ..SweepStats::default()
        };
        for row_sweep in &per_row {
            stats.cells_examined += row_sweep.examined;
            stats.cells_dropped += row_sweep.dropped;
        }

        let before = rows.len();
        rows.retain(|_, row| !row.is_empty());
        stats.rows_emptied = before - rows.len();

        stats
    }
}

impl Default for Sweeper {
    fn default() -> Self {
        Sweeper::new(SweepConfig::default())
    }
}

fn sweep_row(
    row: &mut Row,
    rules: &BTreeMap<String, Option<GcRule>>,
    now: Timestamp,
) -> RowSweep {
    let mut examined = 0;
    let mut dropped = 0;

    let families = row.families_mut();
    for (family, columns) in families.iter_mut() {
        // A family with no entry was deleted (its cells go with it, so
        // this is transient); a family with no rule retains forever.
        let Some(Some(rule)) = rules.get(family) else {
            continue;
        };

        for versions in columns.values_mut() {
            examined += versions.len();
            let before = versions.len();

            // Ranks are assigned over the stored ordering before any
            // removal, so a version's fate never depends on what the
            // sweep already dropped in this pass.
            let mut rank = 0u32;
            versions.retain(|cell| {
                rank += 1;
                !rule.is_garbage(&CellVersion::new(rank, cell.timestamp), now)
            });

            dropped += before - versions.len();
        }

        columns.retain(|_, versions| !versions.is_empty());
    }
    families.retain(|_, columns| !columns.is_empty());

    RowSweep { examined, dropped }
}
