use crate::domain::owner::{Owner, OwnerId};
use crate::domain::ports::OwnerStore;
use crate::error::{BillingError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing owners together with their subscriptions.
pub const CF_OWNERS: &str = "owners";

/// A persistent owner store backed by RocksDB.
///
/// Owners are keyed by their big-endian id and stored as JSON, subscriptions
/// included, so a reload sees exactly the collection that was written.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "owners" column family exists.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_owners = ColumnFamilyDescriptor::new(CF_OWNERS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_owners])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn owners_cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_OWNERS).ok_or_else(|| {
            BillingError::InternalError(Box::new(std::io::Error::other(
                "Owners column family not found",
            )))
        })
    }
}

fn decode(bytes: &[u8]) -> Result<Owner> {
    serde_json::from_slice(bytes).map_err(|e| {
        BillingError::InternalError(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Deserialization error: {}", e),
        )))
    })
}

#[async_trait]
impl OwnerStore for RocksDBStore {
    async fn store(&self, owner: Owner) -> Result<()> {
        let cf = self.owners_cf()?;

        let key = owner.id.to_be_bytes();
        let value = serde_json::to_vec(&owner).map_err(|e| {
            BillingError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;

        self.db.put_cf(cf, key, value)?;

        Ok(())
    }

    async fn get(&self, owner_id: OwnerId) -> Result<Option<Owner>> {
        let cf = self.owners_cf()?;

        match self.db.get_cf(cf, owner_id.to_be_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<Owner>> {
        let cf = self.owners_cf()?;

        let mut owners = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            owners.push(decode(&value)?);
        }

        Ok(owners)
    }
}
