//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend for the registry. It uses rusqlite
//! with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use oracle_registry_core::{canonical_bytes, decode_data_source, DataSource, DataSourceId, ParamKey, Params};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::sequence;
use crate::traits::{Cell, Store};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file (and missing parent directories) and runs
    /// migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        tracing::info!(path = %path.display(), "opened registry database");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking thread pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|e| StoreError::Poisoned(e.to_string()))?;
            f(&mut conn)
        })
        .await?
    }
}

/// Convert an id to its SQLite key.
///
/// SQLite integers are signed; ids beyond `i64::MAX` would break `ORDER BY`.
fn sql_id(id: DataSourceId) -> Result<i64> {
    i64::try_from(id.get())
        .map_err(|_| StoreError::InvalidData(format!("data source id {} out of range", id)))
}

fn read_cell(conn: &Connection, cell: Cell) -> Result<u64> {
    let value: Option<i64> = conn
        .query_row(
            "SELECT value FROM cells WHERE name = ?1",
            params![cell.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value.map(|v| v as u64).unwrap_or(0))
}

fn write_cell(conn: &Connection, cell: Cell, value: u64) -> Result<()> {
    conn.execute(
        "INSERT INTO cells (name, value) VALUES (?1, ?2)
         ON CONFLICT(name) DO UPDATE SET value = excluded.value",
        params![cell.as_str(), value as i64],
    )?;
    Ok(())
}

fn write_record(conn: &Connection, id: DataSourceId, data_source: &DataSource) -> Result<()> {
    conn.execute(
        "INSERT INTO data_sources (id, record) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET record = excluded.record",
        params![sql_id(id)?, canonical_bytes(data_source)],
    )?;
    Ok(())
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_data_source(&self, id: DataSourceId) -> Result<Option<DataSource>> {
        self.with_conn(move |conn| {
            let record: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT record FROM data_sources WHERE id = ?1",
                    params![sql_id(id)?],
                    |row| row.get(0),
                )
                .optional()?;

            record
                .map(|bytes| decode_data_source(&bytes).map_err(StoreError::from))
                .transpose()
        })
        .await
    }

    async fn set_data_source(&self, id: DataSourceId, data_source: &DataSource) -> Result<()> {
        let data_source = data_source.clone();
        self.with_conn(move |conn| write_record(conn, id, &data_source))
            .await
    }

    async fn append_data_source(&self, data_source: &DataSource) -> Result<DataSourceId> {
        let data_source = data_source.clone();

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;

            let counter = read_cell(&tx, Cell::DataSourceCount)?;
            let id = sequence::next_id(counter)?;

            write_cell(&tx, Cell::DataSourceCount, id.get())?;
            write_record(&tx, id, &data_source)?;

            tx.commit()?;
            Ok(id)
        })
        .await
    }

    async fn data_sources(&self) -> Result<Vec<(DataSourceId, DataSource)>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, record FROM data_sources ORDER BY id")?;
            let rows: Vec<(i64, Vec<u8>)> = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(|(id, bytes)| {
                    let ds = decode_data_source(&bytes)?;
                    Ok((DataSourceId::new(id as u64), ds))
                })
                .collect()
        })
        .await
    }

    async fn has_data_source(&self, id: DataSourceId) -> Result<bool> {
        self.with_conn(move |conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM data_sources WHERE id = ?1",
                    params![sql_id(id)?],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
        .await
    }

    async fn get_cell(&self, cell: Cell) -> Result<u64> {
        self.with_conn(move |conn| read_cell(conn, cell)).await
    }

    async fn set_cell(&self, cell: Cell, value: u64) -> Result<()> {
        self.with_conn(move |conn| write_cell(conn, cell, value))
            .await
    }

    async fn get_chain_id(&self) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT chain_id FROM chain WHERE id = 0", [], |row| {
                row.get(0)
            })
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn set_chain_id(&self, chain_id: &str) -> Result<()> {
        let chain_id = chain_id.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO chain (id, chain_id) VALUES (0, ?1)
                 ON CONFLICT(id) DO UPDATE SET chain_id = excluded.chain_id",
                params![chain_id],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_params(&self) -> Result<Option<Params>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT key, value FROM params")?;
            let rows: Vec<(String, i64)> = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            if rows.is_empty() {
                return Ok(None);
            }

            let mut params = Params::default();
            for (key, value) in rows {
                let key: ParamKey = key
                    .parse()
                    .map_err(|e: oracle_registry_core::ValidationError| {
                        StoreError::InvalidData(e.to_string())
                    })?;
                params.set(key, value as u64);
            }
            Ok(Some(params))
        })
        .await
    }

    async fn set_params(&self, params: &Params) -> Result<()> {
        let params = *params;
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            for key in ParamKey::ALL {
                tx.execute(
                    "INSERT INTO params (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    params![key.as_str(), params.get(key) as i64],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle_registry_core::{Address, Coins};

    fn make_data_source(name: &str) -> DataSource {
        DataSource::new(
            Address::new(b"owner".to_vec()).unwrap(),
            name,
            "description",
            Coins::single("uband", 10u64).unwrap(),
            b"executable".to_vec(),
        )
    }

    #[tokio::test]
    async fn test_append_and_get() {
        let store = SqliteStore::open_memory().unwrap();
        let ds = make_data_source("a");

        let id1 = store.append_data_source(&ds).await.unwrap();
        let id2 = store.append_data_source(&ds).await.unwrap();
        assert_eq!(id1, DataSourceId(1));
        assert_eq!(id2, DataSourceId(2));

        let retrieved = store.get_data_source(id1).await.unwrap().unwrap();
        assert_eq!(retrieved, ds);
        assert_eq!(store.get_data_source(DataSourceId(3)).await.unwrap(), None);
        assert_eq!(store.data_source_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store.append_data_source(&make_data_source("a")).await.unwrap();

        let replacement = make_data_source("b");
        store.set_data_source(id, &replacement).await.unwrap();

        assert_eq!(store.get_data_source(id).await.unwrap().unwrap(), replacement);
        assert_eq!(store.data_sources().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_enumeration_is_ascending() {
        let store = SqliteStore::open_memory().unwrap();
        for id in [10u64, 2, 7] {
            store
                .set_data_source(DataSourceId(id), &make_data_source(&id.to_string()))
                .await
                .unwrap();
        }

        let all = store.data_sources().await.unwrap();
        let ids: Vec<u64> = all.iter().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![2, 7, 10]);
        assert_eq!(all[0].1.name, "2");
    }

    #[tokio::test]
    async fn test_failed_append_rolls_back() {
        let store = SqliteStore::open_memory().unwrap();
        // Next id would not fit an SQLite key.
        store
            .set_cell(Cell::DataSourceCount, i64::MAX as u64)
            .await
            .unwrap();

        let result = store.append_data_source(&make_data_source("a")).await;
        assert!(matches!(result, Err(StoreError::InvalidData(_))));
        assert_eq!(store.data_source_count().await.unwrap(), i64::MAX as u64);
        assert!(store.data_sources().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_params_roundtrip() {
        let store = SqliteStore::open_memory().unwrap();
        assert_eq!(store.get_params().await.unwrap(), None);

        let params = Params::default().with(ParamKey::MaxNameLength, 5);
        store.set_params(&params).await.unwrap();
        assert_eq!(store.get_params().await.unwrap(), Some(params));
    }

    #[tokio::test]
    async fn test_chain_id_and_cells() {
        let store = SqliteStore::open_memory().unwrap();
        assert_eq!(store.get_chain_id().await.unwrap(), None);

        store.set_chain_id("bandchain").await.unwrap();
        store.set_chain_id("bandchain-2").await.unwrap();
        assert_eq!(store.get_chain_id().await.unwrap().as_deref(), Some("bandchain-2"));

        store.set_cell(Cell::LatestValidatorsUpdateBlockHeight, 12).await.unwrap();
        assert_eq!(store.get_cell(Cell::LatestValidatorsUpdateBlockHeight).await.unwrap(), 12);
        assert_eq!(store.get_cell(Cell::LatestRelayBlockHeight).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_counter_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("registry.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.append_data_source(&make_data_source("a")).await.unwrap();
            store.append_data_source(&make_data_source("b")).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let id = store.append_data_source(&make_data_source("c")).await.unwrap();
        assert_eq!(id, DataSourceId(3));
        assert_eq!(store.data_sources().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_corrupt_record_surfaces_error() {
        let store = SqliteStore::open_memory().unwrap();
        store
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO data_sources (id, record) VALUES (1, x'00')",
                    [],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let result = store.get_data_source(DataSourceId(1)).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
