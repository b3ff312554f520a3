use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::options::OptionKey;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Store(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub trait OptionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn get_option(&self, key: OptionKey) -> Result<String, StoreError> {
        Ok(self
            .get(key.name())?
            .unwrap_or_else(|| key.default_value().to_string()))
    }

    fn set_option(&self, key: OptionKey, value: &str) -> Result<(), StoreError> {
        self.set(key.name(), value)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryOptionStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl OptionStore for InMemoryOptionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
