use std::{collections::HashMap, hash::Hash, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::StoreError;

/// Generic JSON file-backed key-value map store.
///
/// Persists a `HashMap<K, V>` to a JSON file and rewrites the whole file on
/// every mutation.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Load the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Serialization(format!("{}: {}", file_path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                fs::write(&file_path, serde_json::to_vec(&empty).map_err(|e| StoreError::Serialization(e.to_string()))?)
                    .await
                    .map_err(|e| StoreError::Io(e.to_string()))?;
                empty
            }
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    async fn save(&self, map: &HashMap<K, V>) -> Result<(), StoreError> {
        let data = serde_json::to_vec(map).map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.file_path, data).await.map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }

    /// Run a read-only closure against the map.
    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&HashMap<K, V>) -> R,
    {
        let map = self.inner.read().await;
        f(&map)
    }

    /// Apply a mutation to the map and persist it.
    ///
    /// The write lock is held until the file is written, so concurrent
    /// mutations are serialized. If the closure fails nothing is persisted.
    pub async fn update_map<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<R, StoreError>,
    {
        let mut map = self.inner.write().await;
        let out = f(&mut map)?;
        self.save(&map).await?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_map_store_crud_persists() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_map_store_{}.json", uuid::Uuid::new_v4()));
        let store = JsonMapStore::<String, String>::new(&tmp).await?;

        assert_eq!(store.read(|m| m.len()).await, 0);

        store.update_map(|m| { m.insert("a".into(), "1".into()); m.insert("b".into(), "2".into()); Ok(()) }).await?;
        assert_eq!(store.read(|m| m.get("a").cloned()).await.as_deref(), Some("1"));

        let existed = store.update_map(|m| Ok(m.remove("b").is_some())).await?;
        assert!(existed);

        let reloaded = JsonMapStore::<String, String>::new(&tmp).await?;
        assert_eq!(reloaded.read(|m| m.len()).await, 1);
        assert_eq!(reloaded.read(|m| m.get("a").cloned()).await.as_deref(), Some("1"));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error_not_an_empty_store() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_map_store_{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, b"{not json").await?;
        let res = JsonMapStore::<String, String>::new(&tmp).await;
        assert!(matches!(res, Err(StoreError::Serialization(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_mutation_is_not_persisted() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_map_store_{}.json", uuid::Uuid::new_v4()));
        let store = JsonMapStore::<String, String>::new(&tmp).await?;
        let res: Result<(), StoreError> = store
            .update_map(|m| { m.insert("a".into(), "1".into()); Err(StoreError::Unavailable("boom".into())) })
            .await;
        assert!(res.is_err());
        let reloaded = JsonMapStore::<String, String>::new(&tmp).await?;
        assert_eq!(reloaded.read(|m| m.len()).await, 0);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
