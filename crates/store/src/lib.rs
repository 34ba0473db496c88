//! Storage collaborator for biblio: per-resource in-memory tables.
//!
//! Each resource owns one [`Table`], which assigns sequential ids, keeps
//! records in insertion order, and serializes concurrent access behind a
//! single `RwLock` (last write wins). Writes either persist the full record
//! or nothing; there are no transactions spanning records and no cascades
//! between tables.

use std::collections::BTreeMap;

use thiserror::Error;
use tokio::sync::RwLock;

/// Errors surfaced by table operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no record with id {0}")]
    NotFound(i64),
}

/// A storable record, assembled from a draft plus a table-assigned id.
///
/// The draft carries every field except the id, so a replace always
/// constructs a fresh record with the full field set checked at compile
/// time.
pub trait Record: Clone + Send + Sync + 'static {
    /// Payload carrying every field of the record except its id.
    type Draft: Send + 'static;

    /// Build a record from an assigned id and a draft.
    fn assemble(id: i64, draft: Self::Draft) -> Self;

    /// The record's immutable id.
    fn id(&self) -> i64;
}

struct TableInner<R> {
    rows: BTreeMap<i64, R>,
    next_id: i64,
}

/// One resource's records, keyed by id.
///
/// Ids are assigned sequentially from 1 and never reused, so iterating the
/// map in key order yields records in insertion order.
pub struct Table<R: Record> {
    inner: RwLock<TableInner<R>>,
}

impl<R: Record> Table<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TableInner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<R> {
        self.inner.read().await.rows.values().cloned().collect()
    }

    /// The record with the given id.
    pub async fn get(&self, id: i64) -> Result<R, StoreError> {
        self.inner
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Assign the next id, assemble the draft into a record, and store it.
    pub async fn insert(&self, draft: R::Draft) -> R {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let record = R::assemble(id, draft);
        inner.rows.insert(id, record.clone());
        tracing::debug!(id, "record inserted");
        record
    }

    /// Overwrite every field of an existing record from the draft.
    ///
    /// The stored record is rebuilt from scratch; no field survives unless
    /// the draft resupplies it.
    pub async fn replace(&self, id: i64, draft: R::Draft) -> Result<R, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.rows.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }

        let record = R::assemble(id, draft);
        inner.rows.insert(id, record.clone());
        tracing::debug!(id, "record replaced");
        Ok(record)
    }

    /// Remove the record with the given id.
    pub async fn remove(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        match inner.rows.remove(&id) {
            Some(_) => {
                tracing::debug!(id, "record removed");
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.rows.is_empty()
    }
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Shelf {
        id: i64,
        label: String,
        note: Option<String>,
    }

    struct NewShelf {
        label: String,
        note: Option<String>,
    }

    impl Record for Shelf {
        type Draft = NewShelf;

        fn assemble(id: i64, draft: NewShelf) -> Self {
            Self {
                id,
                label: draft.label,
                note: draft.note,
            }
        }

        fn id(&self) -> i64 {
            self.id
        }
    }

    fn draft(label: &str) -> NewShelf {
        NewShelf {
            label: label.to_string(),
            note: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_from_one() {
        let table: Table<Shelf> = Table::new();

        let a = table.insert(draft("a")).await;
        let b = table.insert(draft("b")).await;

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn get_returns_the_inserted_record() {
        let table: Table<Shelf> = Table::new();
        let created = table.insert(draft("fiction")).await;

        let fetched = table.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let table: Table<Shelf> = Table::new();
        assert_eq!(table.get(42).await, Err(StoreError::NotFound(42)));
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let table: Table<Shelf> = Table::new();
        for label in ["first", "second", "third"] {
            table.insert(draft(label)).await;
        }

        let labels: Vec<_> = table.list().await.into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn replace_rebuilds_the_record_in_full() {
        let table: Table<Shelf> = Table::new();
        let created = table
            .insert(NewShelf {
                label: "old".to_string(),
                note: Some("keep me?".to_string()),
            })
            .await;

        let replaced = table.replace(created.id, draft("new")).await.unwrap();

        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.label, "new");
        // Full replace: the omitted note does not survive.
        assert_eq!(replaced.note, None);
        assert_eq!(table.get(created.id).await.unwrap(), replaced);
    }

    #[tokio::test]
    async fn replace_unknown_id_is_not_found() {
        let table: Table<Shelf> = Table::new();
        assert_eq!(
            table.replace(7, draft("x")).await,
            Err(StoreError::NotFound(7))
        );
    }

    #[tokio::test]
    async fn remove_deletes_and_second_remove_is_not_found() {
        let table: Table<Shelf> = Table::new();
        let created = table.insert(draft("gone")).await;

        table.remove(created.id).await.unwrap();
        assert_eq!(table.get(created.id).await, Err(StoreError::NotFound(1)));
        assert_eq!(table.remove(created.id).await, Err(StoreError::NotFound(1)));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() {
        let table: Table<Shelf> = Table::new();
        let first = table.insert(draft("a")).await;
        table.remove(first.id).await.unwrap();

        let second = table.insert(draft("b")).await;
        assert_eq!(second.id, 2);
    }
}
