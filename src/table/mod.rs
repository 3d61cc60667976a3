/// In-memory wide-column table
///
/// A table holds rows sorted by key; each row holds cells grouped by
/// (column family, qualifier); each (family, qualifier) column holds its
/// versions newest-first. Retention is decided per read against the
/// family's current GC rule — reads serve the live view, and nothing is
/// physically deleted until a sweep runs.
///
/// # Architecture
///
/// ```text
/// Table
///  ├─→ FamilySet                       families + GC rules
///  └─→ rows: BTreeMap<key, Row>        sorted, so scans stream in key order
///       └─→ Row
///            └─→ family → qualifier → [Cell v3, Cell v2, Cell v1]
///                                       (newest first; rank 1 = v3)
/// ```
///
/// # Usage
///
/// ```ignore
/// use tabulet::{GcRule, ReadOptions, Table, TableOptions, Timestamp};
///
/// let table = Table::new("greetings", TableOptions::default());
/// table.create_family("cf1", Some(GcRule::max_versions(2)?))?;
///
/// table.put("greeting0", "cf1", "message", Timestamp::now(), "Hello World!")?;
///
/// let row = table.read_row("greeting0", &ReadOptions::default());
/// ```
pub mod cell;
pub mod row;
pub mod scan;
#[allow(clippy::module_inception)]
pub mod table;

pub use cell::Cell;
pub use row::{Row, RowView};
pub use scan::Scan;
pub use table::{Entry, EntryError, ReadOptions, Table, TableOptions};
