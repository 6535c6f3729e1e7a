//! Explicit store registry, keyed by collection name.
//!
//! One factory may create several logical collections; the registry records
//! which store definitions belong to which collection so lookups never see
//! another collection's stores.

use imagevault_core::{AppError, AppResult, StoreDefinition};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct StoreRegistry {
    collections: Mutex<BTreeMap<String, Vec<StoreDefinition>>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a collection's definitions. Registering the same collection
    /// name twice is a configuration error: silently replacing definitions
    /// would change the meaning of already-resolved URLs.
    pub fn register(
        &self,
        collection: &str,
        definitions: Vec<StoreDefinition>,
    ) -> AppResult<()> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|_| AppError::Internal("store registry lock poisoned".to_string()))?;

        if collections.contains_key(collection) {
            return Err(AppError::config(format!(
                "collection already registered: {}",
                collection
            )));
        }
        collections.insert(collection.to_string(), definitions);
        Ok(())
    }

    /// Definitions for one collection, if registered.
    pub fn get(&self, collection: &str) -> Option<Vec<StoreDefinition>> {
        self.collections.lock().ok()?.get(collection).cloned()
    }

    /// Names of all registered collections.
    pub fn collection_names(&self) -> Vec<String> {
        self.collections
            .lock()
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagevault_core::AccessPolicy;

    fn definition(name: &str) -> StoreDefinition {
        StoreDefinition {
            name: name.to_string(),
            bucket: "photos".to_string(),
            key_prefix: name.to_string(),
            access_policy: AccessPolicy::Private,
            variant: None,
        }
    }

    #[test]
    fn test_lookup_returns_only_own_collection() {
        let registry = StoreRegistry::new();
        registry
            .register("avatars", vec![definition("avatars-original")])
            .unwrap();
        registry
            .register("covers", vec![definition("covers-original")])
            .unwrap();

        let avatars = registry.get("avatars").unwrap();
        assert_eq!(avatars.len(), 1);
        assert_eq!(avatars[0].name, "avatars-original");
        assert!(registry.get("unknown").is_none());
        assert_eq!(registry.collection_names(), vec!["avatars", "covers"]);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let registry = StoreRegistry::new();
        registry
            .register("avatars", vec![definition("avatars-original")])
            .unwrap();
        let err = registry
            .register("avatars", vec![definition("avatars-original")])
            .unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }
}
