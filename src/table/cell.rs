use bytes::Bytes;

use crate::gc::Timestamp;

/// One version of one column's value
///
/// Cells are immutable once written; a new write to the same (row,
/// family, qualifier) adds a newer version rather than mutating this one.
/// Writing with a timestamp that already exists replaces that version's
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub timestamp: Timestamp,
    pub value: Bytes,
}

impl Cell {
    pub fn new(timestamp: Timestamp, value: impl Into<Bytes>) -> Self {
        Cell {
            timestamp,
            value: value.into(),
        }
    }
}
