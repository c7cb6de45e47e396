use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::utils::errors::AppResult;

/// Almacenamiento clave → JSON en un fichero local
///
/// Cada escritura reescribe el fichero completo vía fichero temporal +
/// rename, así un lector nunca ve un estado a medias.
#[derive(Clone)]
pub struct LocalStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let _guard = self.lock.lock().await;
        let entries = self.read_entries().await?;

        match entries.get(key) {
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(parsed) => {
                    debug!("📥 Store HIT para clave: {}", key);
                    Ok(Some(parsed))
                }
                Err(e) => {
                    warn!("⚠️ Valor ilegible en store para clave {}: {}", key, e);
                    Ok(None)
                }
            },
            None => {
                debug!("❌ Store MISS para clave: {}", key);
                Ok(None)
            }
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let serialized = serde_json::to_value(value)?;
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), serialized);
        self.write_entries(&entries).await?;
        debug!("💾 Store SET para clave: {}", key);
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> AppResult<bool> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        let existed = entries.remove(key).is_some();
        if existed {
            self.write_entries(&entries).await?;
            debug!("🗑️ Store DELETE para clave: {}", key);
        }
        Ok(existed)
    }

    async fn read_entries(&self) -> AppResult<BTreeMap<String, Value>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => Ok(entries),
                Err(e) => {
                    warn!("⚠️ Store corrupto en {}, se ignora: {}", self.path.display(), e);
                    Ok(BTreeMap::new())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, Value>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}
