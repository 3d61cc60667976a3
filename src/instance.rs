use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use crate::{
    table::{Table, TableOptions},
    util::{Result, Status},
};

/// A named catalog of tables
///
/// The usual entry point for callers that manage more than one table:
///
/// ```ignore
/// use tabulet::{Instance, TableOptions};
///
/// let instance = Instance::new();
/// if !instance.table_exists("Hello-Tabulet") {
///     instance.create_table("Hello-Tabulet")?;
/// }
/// let table = instance.table("Hello-Tabulet")?;
/// ```
///
/// Tables are handed out as `Arc<Table>`; deleting a table removes it
/// from the catalog, and existing handles simply go dead with the last
/// clone.
pub struct Instance {
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl Instance {
    pub fn new() -> Self {
        Instance {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Create a table with no families.
    pub fn create_table(&self, name: &str) -> Result<Arc<Table>> {
        self.create_table_with(name, TableOptions::default())
    }

    /// Create a table, optionally with its initial families.
    pub fn create_table_with(&self, name: &str, options: TableOptions) -> Result<Arc<Table>> {
        if name.is_empty() {
            return Err(Status::invalid_argument("table name must not be empty"));
        }

        let mut tables = self.tables.write();
        if tables.contains_key(name) {
            return Err(Status::already_exists(format!(
                "table '{name}' already exists"
            )));
        }

        let table = Arc::new(Table::new(name, options)?);
        tables.insert(name.to_string(), Arc::clone(&table));
        Ok(table)
    }

    pub fn table(&self, name: &str) -> Result<Arc<Table>> {
        self.tables
            .read()
            .get(name)
            .map(Arc::clone)
            .ok_or_else(|| Status::not_found(format!("no such table: {name}")))
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    pub fn delete_table(&self, name: &str) -> Result<()> {
        self.tables
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Status::not_found(format!("no such table: {name}")))
    }

    /// Table names in sorted order.
    pub fn list_tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for Instance {
    fn default() -> Self {
        Instance::new()
    }
}
