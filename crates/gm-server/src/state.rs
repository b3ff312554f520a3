use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use metrics_api::{ApiTokenVerifier, HttpApiConfig, HttpMetricsApi, MetricsApi};
use parking_lot::Mutex;
use settings::{
    InMemoryNoticeSink, NoticeSink, OptionStore, SettingsForm, SqliteOptionStore, SystemConfig,
    SystemConfigLoader,
};
use uuid::Uuid;

use crate::error::AppError;

const MAX_LIVE_NONCES: usize = 64;

pub struct AppState {
    pub config: SystemConfig,
    pub admin_token: String,
    pub store: Arc<dyn OptionStore>,
    pub api: Arc<dyn MetricsApi>,
    pub notices: Arc<dyn NoticeSink>,
    pub form: SettingsForm,
    pub nonces: NonceRegistry,
}

impl AppState {
    pub fn new(
        config: SystemConfig,
        store: Arc<dyn OptionStore>,
        api: Arc<dyn MetricsApi>,
    ) -> Self {
        let admin_token = config.get_string("security.admin_token");
        let notices: Arc<dyn NoticeSink> = InMemoryNoticeSink::shared();
        let verifier = Arc::new(ApiTokenVerifier::new(api.clone()));
        let form = SettingsForm::new(store.clone(), verifier, notices.clone());
        Self {
            config,
            admin_token,
            store,
            api,
            notices,
            form,
            nonces: NonceRegistry::default(),
        }
    }

    pub fn from_config(config: SystemConfig) -> Result<Self, AppError> {
        let store = build_store(&config)?;
        let api = build_api(&config);
        Ok(Self::new(config, store, api))
    }
}

// Nonces handed to the admin page for the AJAX save endpoint. The oldest
// nonce is dropped once the registry is full.
#[derive(Default)]
pub struct NonceRegistry {
    issued: Mutex<VecDeque<String>>,
}

impl NonceRegistry {
    pub fn issue(&self) -> String {
        let nonce = Uuid::new_v4().simple().to_string();
        let mut issued = self.issued.lock();
        if issued.len() >= MAX_LIVE_NONCES {
            issued.pop_front();
        }
        issued.push_back(nonce.clone());
        nonce
    }

    pub fn verify(&self, nonce: &str) -> bool {
        !nonce.is_empty() && self.issued.lock().iter().any(|issued| issued == nonce)
    }
}

pub fn load_config(path: &Path) -> Result<SystemConfig, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(SystemConfigLoader::from_str(&raw)?)
}

pub fn create_default_config(path: &Path) -> Result<String, AppError> {
    let content = SystemConfigLoader::default_template();
    std::fs::write(path, content.as_bytes())?;
    Ok(content)
}

fn build_store(config: &SystemConfig) -> Result<Arc<dyn OptionStore>, AppError> {
    let path = config.get_string("storage.sqlite_path");
    let store = SqliteOptionStore::open(&path)?;
    store.ensure_schema()?;
    Ok(Arc::new(store))
}

fn build_api(config: &SystemConfig) -> Arc<dyn MetricsApi> {
    let timeout_ms = config.get_number("api.timeout_ms");
    let timeout_ms = if timeout_ms <= 0 { 30_000 } else { timeout_ms as u64 };
    Arc::new(HttpMetricsApi::new(HttpApiConfig {
        timeout_ms,
        user_agent: config.get_string("api.user_agent"),
    }))
}
