use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::{FrequencyTable, RegistryError};

pub(crate) type Entries = IndexMap<String, Arc<FrequencyTable>>;

/// Named tag tables of the files uploaded so far.
///
/// Cloning gives another handle to the same datasets, every session of a
/// running instance shares one registry. Names are kept in the order they
/// were registered in.
#[derive(Clone, Debug, Default)]
pub struct DatasetRegistry {
    inner: Arc<RwLock<Entries>>,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        debug_assert!(!name.is_empty(), "dataset lookup with empty name");
        self.read().contains_key(name)
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Result<Arc<FrequencyTable>, RegistryError> {
        debug_assert!(!name.is_empty(), "dataset lookup with empty name");
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))
    }

    /// Store a new dataset.
    ///
    /// An existing dataset with the same name is left alone, returns whether
    /// the table was stored.
    pub fn put(&self, name: impl Into<String>, table: FrequencyTable) -> bool {
        let name = name.into();
        let mut entries = self.write();
        if entries.contains_key(&name) {
            log::debug!("put: {name:?} already registered, keeping it");
            return false;
        }
        log::info!("put: registered {name:?} with {} tags", table.len());
        entries.insert(name, Arc::new(table));
        true
    }

    /// Store a dataset, overwriting any existing one with the same name.
    ///
    /// The name keeps its original position when overwritten.
    pub fn replace(
        &self,
        name: impl Into<String>,
        table: FrequencyTable,
    ) -> Option<Arc<FrequencyTable>> {
        let name = name.into();
        log::info!("replace: storing {name:?} with {} tags", table.len());
        self.write().insert(name, Arc::new(table))
    }

    /// Delete a dataset, returns whether there was one to delete.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.write().shift_remove(name).is_some();
        if removed {
            log::info!("remove: deleted {name:?}");
        }
        removed
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Entries> {
        // No mutation can leave the map half-updated.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
