//! Noise Field Cache
//!
//! Generated fields are cached by their params key for the lifetime of the
//! cache object. There is no eviction: a map typically uses one or two
//! distinct fields. Attaching a [`NoiseStore`] makes fields survive restarts.

use std::collections::HashMap;
use std::sync::Arc;

use super::field::{NoiseField, NoiseParams};
use super::store::{NoiseStore, NoiseStoreError};

/// Cache of generated noise fields, optionally backed by a disk store.
#[derive(Debug, Default)]
pub struct NoiseCache {
    fields: HashMap<String, Arc<NoiseField>>,
    store: Option<NoiseStore>,
}

impl NoiseCache {
    /// In-memory cache only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache that loads fields from `store` and writes newly generated ones to it.
    pub fn with_store(store: NoiseStore) -> Self {
        Self {
            fields: HashMap::new(),
            store: Some(store),
        }
    }

    pub fn store(&self) -> Option<&NoiseStore> {
        self.store.as_ref()
    }

    /// Number of distinct fields held.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Cached field for `params`, if one was produced already.
    pub fn get(&self, params: &NoiseParams) -> Option<Arc<NoiseField>> {
        self.fields.get(&params.key()).cloned()
    }

    /// Return the field for `params`, generating (and persisting) it on first use.
    ///
    /// With a store attached, generated fields are quantized to the store's
    /// 16-bit precision before caching so loaded and fresh fields agree. A
    /// failed save is reported on stderr and the field is still returned.
    pub fn get_or_generate(
        &mut self,
        params: &NoiseParams,
    ) -> Result<Arc<NoiseField>, NoiseStoreError> {
        let key = params.key();
        if let Some(field) = self.fields.get(&key) {
            return Ok(Arc::clone(field));
        }

        let field = match &self.store {
            Some(store) => match store.load(params)? {
                Some(field) => field,
                None => {
                    let field = NoiseField::generate(params).quantized();
                    if let Err(e) = store.save(params, &field) {
                        eprintln!(
                            "[NoiseStore] Failed to save {}: {e}",
                            store.path_for(params).display()
                        );
                    }
                    field
                }
            },
            None => NoiseField::generate(params),
        };

        let field = Arc::new(field);
        self.fields.insert(key, Arc::clone(&field));
        Ok(field)
    }
}
