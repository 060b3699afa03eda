//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use oracle_registry_core::{DataSource, DataSourceId, Params};

use crate::error::{Result, StoreError};
use crate::sequence;
use crate::traits::{Cell, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock; each
/// write holds the lock for its whole critical section, so readers see either
/// all of a write or none of it.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Records ordered by id.
    data_sources: BTreeMap<DataSourceId, DataSource>,

    /// Counter cells.
    cells: BTreeMap<Cell, u64>,

    chain_id: Option<String>,

    params: Option<Params>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_data_source(&self, id: DataSourceId) -> Result<Option<DataSource>> {
        let inner = self.read()?;
        Ok(inner.data_sources.get(&id).cloned())
    }

    async fn set_data_source(&self, id: DataSourceId, data_source: &DataSource) -> Result<()> {
        let mut inner = self.write()?;
        inner.data_sources.insert(id, data_source.clone());
        Ok(())
    }

    async fn append_data_source(&self, data_source: &DataSource) -> Result<DataSourceId> {
        let mut inner = self.write()?;

        let counter = inner.cells.get(&Cell::DataSourceCount).copied().unwrap_or(0);
        let id = sequence::next_id(counter)?;

        inner.cells.insert(Cell::DataSourceCount, id.get());
        inner.data_sources.insert(id, data_source.clone());

        Ok(id)
    }

    async fn data_sources(&self) -> Result<Vec<(DataSourceId, DataSource)>> {
        let inner = self.read()?;
        Ok(inner
            .data_sources
            .iter()
            .map(|(id, ds)| (*id, ds.clone()))
            .collect())
    }

    async fn has_data_source(&self, id: DataSourceId) -> Result<bool> {
        let inner = self.read()?;
        Ok(inner.data_sources.contains_key(&id))
    }

    async fn get_cell(&self, cell: Cell) -> Result<u64> {
        let inner = self.read()?;
        Ok(inner.cells.get(&cell).copied().unwrap_or(0))
    }

    async fn set_cell(&self, cell: Cell, value: u64) -> Result<()> {
        let mut inner = self.write()?;
        inner.cells.insert(cell, value);
        Ok(())
    }

    async fn get_chain_id(&self) -> Result<Option<String>> {
        let inner = self.read()?;
        Ok(inner.chain_id.clone())
    }

    async fn set_chain_id(&self, chain_id: &str) -> Result<()> {
        let mut inner = self.write()?;
        inner.chain_id = Some(chain_id.to_string());
        Ok(())
    }

    async fn get_params(&self) -> Result<Option<Params>> {
        let inner = self.read()?;
        Ok(inner.params)
    }

    async fn set_params(&self, params: &Params) -> Result<()> {
        let mut inner = self.write()?;
        inner.params = Some(*params);
        Ok(())
    }
}
