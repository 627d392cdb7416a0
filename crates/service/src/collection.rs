//! Prefixed-sequence collection shared by both repositories.
//!
//! Ids look like `<prefix><n>`. The next id is computed by scanning the whole
//! collection, so two concurrent creators can observe the same maximum and
//! write the same id; the later write overwrites the earlier document.

use std::{marker::PhantomData, sync::Arc};

use configs::IdStrategy;
use models::DocumentCodec;
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::storage::{DocumentStore, StoredDocument};

/// Next id after the highest numeric suffix among `ids`; `<prefix>1` if none.
///
/// Ids without the prefix are parsed whole; ids whose remainder is not a
/// non-negative integer are ignored. `None` once the suffix reaches `u64::MAX`.
pub fn next_sequence_id<'a, I>(prefix: &str, ids: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let max = ids
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix).unwrap_or(id).parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    max.checked_add(1).map(|next| format!("{prefix}{next}"))
}

pub struct SequenceCollection<T> {
    store: Arc<dyn DocumentStore>,
    collection: String,
    prefix: String,
    strategy: IdStrategy,
    _entity: PhantomData<fn() -> T>,
}

impl<T: DocumentCodec> SequenceCollection<T> {
    /// Collection named and prefixed by the entity codec.
    pub fn new(store: Arc<dyn DocumentStore>, strategy: IdStrategy) -> Self {
        Self::with_names(store, T::COLLECTION, T::ID_PREFIX, strategy)
    }

    pub fn with_names(store: Arc<dyn DocumentStore>, collection: &str, prefix: &str, strategy: IdStrategy) -> Self {
        Self {
            store,
            collection: collection.to_string(),
            prefix: prefix.to_string(),
            strategy,
            _entity: PhantomData,
        }
    }

    fn decode_all(&self, docs: Vec<StoredDocument>) -> Result<Vec<T>, ServiceError> {
        docs.iter()
            .map(|(id, doc)| T::from_document(id, doc).map_err(ServiceError::from))
            .collect()
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn next_id(&self) -> Result<String, ServiceError> {
        let docs = self.store.list(&self.collection).await?;
        next_sequence_id(&self.prefix, docs.iter().map(|(id, _)| id.as_str()))
            .ok_or_else(|| ServiceError::SequenceExhausted(self.collection.clone()))
    }

    pub async fn list(&self) -> Result<Vec<T>, ServiceError> {
        let docs = self.store.list(&self.collection).await?;
        self.decode_all(docs)
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, ServiceError> {
        match self.store.get(&self.collection, id).await? {
            Some(doc) => Ok(Some(T::from_document(id, &doc)?)),
            None => Ok(None),
        }
    }

    /// Persist a new entity and return its id.
    #[instrument(skip(self, entity), fields(collection = %self.collection))]
    pub async fn create(&self, entity: T) -> Result<String, ServiceError> {
        let id = match self.strategy {
            IdStrategy::Sequence => {
                let id = self.next_id().await?;
                let stamped = entity.with_id(id.clone());
                self.store.set(&self.collection, &id, stamped.to_document()).await?;
                id
            }
            IdStrategy::StoreAssigned => {
                let mut doc = entity.to_document();
                doc.remove("id");
                self.store.add(&self.collection, doc).await?
            }
        };
        debug!(%id, "document created");
        Ok(id)
    }

    /// Overwrite the document at `id`; existence is not checked.
    pub async fn update(&self, id: &str, entity: T) -> Result<(), ServiceError> {
        let stamped = entity.with_id(id.to_string());
        self.store.set(&self.collection, id, stamped.to_document()).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete(&self.collection, id).await?;
        Ok(())
    }

    pub async fn list_where(&self, field: &str, value: &str) -> Result<Vec<T>, ServiceError> {
        let docs = self.store.where_equal_to(&self.collection, field, value).await?;
        self.decode_all(docs)
    }
}
