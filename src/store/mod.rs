//! # Item Store
//!
//! Storage adapter for the "items" collection. Owns the MongoDB handle for
//! the process lifetime and translates typed operations into single
//! collection queries. Multi-step sequences (read-max-then-insert) are not
//! atomic; callers inherit the database's per-operation serialization only.

pub mod errors;
pub mod item;

pub use errors::{StoreError, StoreResult};
pub use item::{Item, ItemPatch, NewItem};

use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};

/// Database used when the connection string names none
const DEFAULT_DATABASE: &str = "itemstore";

/// Collection holding every item document
const COLLECTION: &str = "items";

/// Next sequential identifier: one past the stored maximum, or 1 for an
/// empty collection. Two callers reading the same maximum will both
/// produce the same value; the unique index rejects the second insert.
pub fn next_identifier(max: Option<i64>) -> i64 {
    max.map_or(1, |id| id + 1)
}

/// Typed adapter over the items collection
#[derive(Clone)]
pub struct ItemStore {
    items: Collection<Item>,
}

impl ItemStore {
    /// Connect to MongoDB, verify the connection with a ping, and ensure
    /// the unique index on `id`.
    ///
    /// The ping is what gates server startup: the listener must not open
    /// until this returns Ok.
    pub async fn connect(uri: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        database.run_command(doc! { "ping": 1 }).await?;

        let store = Self {
            items: database.collection::<Item>(COLLECTION),
        };
        store.ensure_indexes().await?;
        Ok(store)
    }

    /// Build a handle without contacting the server: no ping, no index
    /// creation. The driver defers I/O until the first operation, so this
    /// is enough for router construction in tests.
    pub async fn connect_lazy(uri: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        Ok(Self {
            items: database.collection::<Item>(COLLECTION),
        })
    }

    /// Unique index on the application-assigned identifier. Collisions
    /// from the read-then-write assignment fail here as duplicate keys.
    async fn ensure_indexes(&self) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.items.create_index(index).await?;
        Ok(())
    }

    /// Structural check for a storage key, without touching the database
    pub fn is_valid_key(key: &str) -> bool {
        ObjectId::parse_str(key).is_ok()
    }

    fn parse_key(key: &str) -> StoreResult<ObjectId> {
        Ok(ObjectId::parse_str(key)?)
    }

    /// Every item, in the database's natural return order
    pub async fn list_all(&self) -> StoreResult<Vec<Item>> {
        let cursor = self.items.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Look up one item by its storage key
    pub async fn get_by_key(&self, key: &str) -> StoreResult<Item> {
        let key = Self::parse_key(key)?;
        self.items
            .find_one(doc! { "_id": key })
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Persist a new item, returning the stored document with its
    /// database-assigned storage key
    pub async fn insert(&self, new_item: NewItem) -> StoreResult<Item> {
        let mut item = new_item.into_item();
        let result = self
            .items
            .insert_one(&item)
            .await
            .map_err(classify_insert_error)?;
        item.key = result.inserted_id.as_object_id();
        Ok(item)
    }

    /// Overwrite the mutable fields of the item at `key` and return the
    /// post-update document. Absent patch fields erase stored values.
    pub async fn update_by_key(&self, key: &str, patch: &ItemPatch) -> StoreResult<Item> {
        let key = Self::parse_key(key)?;
        self.items
            .find_one_and_update(doc! { "_id": key }, patch.update_document())
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Remove the item at `key` permanently
    pub async fn delete_by_key(&self, key: &str) -> StoreResult<()> {
        let key = Self::parse_key(key)?;
        self.items
            .find_one_and_delete(doc! { "_id": key })
            .await?
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    /// Largest identifier currently stored, or None for an empty collection
    pub async fn max_identifier(&self) -> StoreResult<Option<i64>> {
        let latest = self
            .items
            .find_one(doc! {})
            .sort(doc! { "id": -1 })
            .await?;
        Ok(latest.map(|item| item.id))
    }
}

/// Pull the raw uniqueness-violation message out of a write error so the
/// router can forward it verbatim; everything else stays a driver error.
fn classify_insert_error(err: mongodb::error::Error) -> StoreError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref() {
        if write_error.code == 11000 {
            return StoreError::Duplicate(write_error.message.clone());
        }
    }
    StoreError::Database(err)
}
