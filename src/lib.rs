pub mod admin;
pub mod family;
pub mod gc;
pub mod instance;
pub mod sweep;
pub mod table;
pub mod util;

pub use admin::FamilyAdmin;
pub use family::{ColumnFamily, FamilyDescriptor, FamilyHandle, FamilySet};
pub use gc::{CellVersion, Combine, GcRule, MIN_AGE, RuleConfig, RuleDescriptor, Timestamp};
pub use instance::Instance;
pub use sweep::{SweepConfig, SweepStats, Sweeper};
pub use table::{Cell, Entry, EntryError, ReadOptions, RowView, Scan, Table, TableOptions};
pub use util::{Result, Status};
