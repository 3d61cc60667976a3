use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use crate::{
    family::{ColumnFamily, FamilyDescriptor, FamilyHandle},
    gc::GcRule,
    util::{Result, Status},
};

/// Manages all column families in a table
///
/// FamilySet maintains:
/// - Map of family id → [`ColumnFamily`]
/// - Map of family name → id for lookup
/// - Next id allocation
///
/// # Thread Safety
///
/// All operations are protected by RwLock:
/// - Reads (get family, list) use read locks
/// - Writes (create, drop) use write locks
#[derive(Debug)]
pub struct FamilySet {
    /// Map of family id → ColumnFamily
    families: RwLock<HashMap<u32, Arc<ColumnFamily>>>,

    /// Map of family name → id for quick lookup
    name_to_id: RwLock<HashMap<String, u32>>,

    /// Next family id to allocate
    next_id: RwLock<u32>,
}

impl FamilySet {
    pub fn new() -> Self {
        FamilySet {
            families: RwLock::new(HashMap::new()),
            name_to_id: RwLock::new(HashMap::new()),
            next_id: RwLock::new(0),
        }
    }

    /// Create a FamilySet pre-populated from descriptors. Rules are
    /// validated; a duplicate name fails the whole call.
    pub fn with_families(descriptors: &[FamilyDescriptor]) -> Result<Self> {
        let set = FamilySet::new();
        for descriptor in descriptors {
            set.create(&descriptor.name, descriptor.rule.clone())?;
        }
        Ok(set)
    }

    /// Create a new column family with an optional retention rule
    pub fn create(&self, name: &str, rule: Option<GcRule>) -> Result<FamilyHandle> {
        if name.is_empty() {
            return Err(Status::invalid_argument("family name must not be empty"));
        }
        if let Some(rule) = &rule {
            rule.validate()?;
        }

        // The name lock is held across check and insert so two racing
        // creates cannot both claim the same name.
        let mut name_map = self.name_to_id.write();
        if name_map.contains_key(name) {
            return Err(Status::already_exists(format!(
                "column family '{name}' already exists"
            )));
        }

        let id = {
            let mut next_id = self.next_id.write();
            let id = *next_id;
            *next_id += 1;
            id
        };

        let family = Arc::new(ColumnFamily::new(id, name.to_string(), rule));
        let handle = family.handle();

        {
            let mut families = self.families.write();
            families.insert(id, family);
        }
        name_map.insert(name.to_string(), id);

        Ok(handle)
    }

    /// Get family by name
    pub fn get(&self, name: &str) -> Option<Arc<ColumnFamily>> {
        let name_map = self.name_to_id.read();
        let id = *name_map.get(name)?;
        drop(name_map);

        let families = self.families.read();
        families.get(&id).map(Arc::clone)
    }

    /// Get family by name, creating it (with `rule`) if absent
    pub fn get_or_create(&self, name: &str, rule: Option<GcRule>) -> Result<Arc<ColumnFamily>> {
        if let Some(family) = self.get(name) {
            return Ok(family);
        }
        match self.create(name, rule) {
            Ok(_) => {},
            // Lost a create race; the family exists now.
            Err(e) if e.is_already_exists() => {},
            Err(e) => return Err(e),
        }
        self.get(name)
            .ok_or_else(|| Status::not_found(format!("column family '{name}' not found")))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.name_to_id.read().contains_key(name)
    }

    /// Drop a column family
    pub fn drop_family(&self, name: &str) -> Result<()> {
        let id = {
            let mut name_map = self.name_to_id.write();
            name_map.remove(name).ok_or_else(|| {
                Status::not_found(format!("column family '{name}' not found"))
            })?
        };

        let mut families = self.families.write();
        families.remove(&id);
        Ok(())
    }

    /// List all family handles, ordered by id (creation order)
    pub fn list(&self) -> Vec<FamilyHandle> {
        let families = self.families.read();
        let mut handles: Vec<FamilyHandle> = families.values().map(|f| f.handle()).collect();
        handles.sort_by_key(|h| h.id());
        handles
    }

    /// Number of column families
    pub fn count(&self) -> usize {
        self.families.read().len()
    }
}

impl Default for FamilySet {
    fn default() -> Self {
        FamilySet::new()
    }
}
