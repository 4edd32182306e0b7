// ============================================================================
// STORAGE - Puerto clave/valor sobre localStorage / sessionStorage
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use web_sys::{window, Storage};
use crate::error::ClientError;

/// Puerto clave/valor. Las lecturas nunca fallan: un storage no disponible
/// se comporta como vacío.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Session,
}

impl StorageArea {
    fn name(&self) -> &'static str {
        match self {
            StorageArea::Local => "localStorage",
            StorageArea::Session => "sessionStorage",
        }
    }
}

/// Storage real del navegador. Se resuelve en cada llamada porque el
/// navegador puede negarlo (modo privado, cookies bloqueadas).
#[derive(Debug, Clone, Copy)]
pub struct WebStorage {
    area: StorageArea,
}

impl WebStorage {
    pub fn local() -> Self {
        Self { area: StorageArea::Local }
    }

    pub fn session() -> Self {
        Self { area: StorageArea::Session }
    }

    fn storage(&self) -> Option<Storage> {
        let win = window()?;
        match self.area {
            StorageArea::Local => win.local_storage().ok()?,
            StorageArea::Session => win.session_storage().ok()?,
        }
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let storage = self
            .storage()
            .ok_or_else(|| ClientError::Storage(format!("No se pudo acceder a {}", self.area.name())))?;
        storage
            .set_item(key, value)
            .map_err(|_| ClientError::Storage(format!("Error guardando '{}' en {}", key, self.area.name())))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            if storage.remove_item(key).is_err() {
                log::warn!("⚠️ [STORAGE] No se pudo eliminar '{}' de {}", key, self.area.name());
            }
        }
    }
}

/// Storage en memoria, para tests y para navegadores sin storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simula un storage bloqueado: lecturas vacías, escrituras rechazadas
    pub fn unavailable() -> Self {
        Self {
            items: RefCell::new(HashMap::new()),
            unavailable: true,
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        if self.unavailable {
            return None;
        }
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        if self.unavailable {
            return Err(ClientError::Storage("storage no disponible".to_string()));
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Lee y deserializa un valor JSON; valores corruptos se tratan como ausentes
pub fn load_json<T: serde::de::DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Valor inválido en '{}': {}", key, e);
            None
        }
    }
}

pub fn save_json<T: serde::Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), ClientError> {
    let json = serde_json::to_string(value)
        .map_err(|e| ClientError::Storage(format!("Error serializando datos: {}", e)))?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let store = MemoryStorage::new();
        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("abc"));
        store.remove("token");
        assert_eq!(store.get("token"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn unavailable_storage_reads_empty_and_rejects_writes() {
        let store = MemoryStorage::unavailable();
        assert!(store.set("token", "abc").is_err());
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn corrupted_json_is_treated_as_absent() {
        let store = MemoryStorage::new();
        store.set("user", "{not json").unwrap();
        let loaded: Option<serde_json::Value> = load_json(&store, "user");
        assert!(loaded.is_none());

        save_json(&store, "user", &serde_json::json!({"nombre": "Ana"})).unwrap();
        let loaded: Option<serde_json::Value> = load_json(&store, "user");
        assert_eq!(loaded.unwrap()["nombre"], "Ana");
    }
}
