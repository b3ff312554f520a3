use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::{save_advanced, AdvancedOptions, EmbedMode, FlagName, Settings};
use crate::notice::{Notice, NoticeSink};
use crate::options::OptionKey;
use crate::store::{OptionStore, StoreError};
use crate::validate::{coerce_flag, sanitize_text_field, validate_url, ValidationError};

const URL_ERROR: &str = "ghost_metrics_url_error";
const AUTH_ERROR: &str = "ghost_metrics_auth_error";

#[derive(Debug, Error)]
#[error("token verification failed: {0}")]
pub struct VerificationError(pub String);

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify_token(&self, base_url: &str, token: &str) -> Result<(), VerificationError>;
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SettingsSubmission {
    #[serde(default)]
    pub ghost_metrics_url: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub embed_mode: Option<String>,
    #[serde(default)]
    pub selected_site_id: Option<String>,
    #[serde(default)]
    pub selected_container_id: Option<String>,
    #[serde(default)]
    pub advanced: Option<BTreeMap<String, Value>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RejectedField {
    pub field: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SaveReport {
    pub accepted: Vec<String>,
    pub rejected: Vec<RejectedField>,
}

impl SaveReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    fn accept(&mut self, key: OptionKey) {
        self.accepted.push(key.name().to_string());
    }

    fn reject(&mut self, key: OptionKey, err: &ValidationError) {
        self.rejected.push(RejectedField {
            field: key.name().to_string(),
            message: err.to_string(),
        });
    }
}

pub struct SettingsForm {
    store: Arc<dyn OptionStore>,
    verifier: Arc<dyn TokenVerifier>,
    notices: Arc<dyn NoticeSink>,
}

impl SettingsForm {
    pub fn new(
        store: Arc<dyn OptionStore>,
        verifier: Arc<dyn TokenVerifier>,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            store,
            verifier,
            notices,
        }
    }

    pub async fn apply(&self, submission: SettingsSubmission) -> Result<SaveReport, StoreError> {
        let previous = self.blocking(|store| Settings::load(store)).await?;
        let mut report = SaveReport::default();
        let mut writes: Vec<(OptionKey, String)> = Vec::new();

        if let Some(mode) = &submission.embed_mode {
            let mode = EmbedMode::parse(&sanitize_text_field(mode));
            writes.push((OptionKey::EmbedMode, mode.as_str().to_string()));
        }
        if let Some(site_id) = &submission.selected_site_id {
            writes.push((OptionKey::SelectedSiteId, sanitize_text_field(site_id)));
        }
        if let Some(container_id) = &submission.selected_container_id {
            writes.push((
                OptionKey::SelectedContainerId,
                sanitize_text_field(container_id),
            ));
        }

        let mut base_url = previous.ghost_metrics_url.clone();
        if let Some(url) = &submission.ghost_metrics_url {
            match validate_url(url) {
                Ok(url) => {
                    writes.push((OptionKey::GhostMetricsUrl, url.clone()));
                    base_url = url;
                }
                Err(err) => {
                    warn!(url = %url, error = %err, "instance url rejected");
                    self.notices.record(Notice::error(URL_ERROR, err.to_string()));
                    report.reject(OptionKey::GhostMetricsUrl, &err);
                }
            }
        }

        if let Some(token) = &submission.auth_token {
            if let Some(token) = self.check_token(token, &base_url, &mut report).await {
                writes.push((OptionKey::AuthToken, token));
            }
        }

        let flags = submission
            .advanced
            .as_ref()
            .and_then(|flags| resolve_flags(&previous.selected_site_id, flags));

        for (key, _) in &writes {
            report.accept(*key);
        }
        self.blocking(move |store| {
            for (key, value) in &writes {
                store.set_option(*key, value)?;
            }
            match &flags {
                Some(options) => save_advanced(store, options),
                None => Ok(()),
            }
        })
        .await?;

        if report.is_clean() {
            self.notices.record(Notice::updated("Settings saved."));
        }
        info!(
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            "settings submission applied"
        );
        Ok(report)
    }

    async fn check_token(
        &self,
        raw: &str,
        base_url: &str,
        report: &mut SaveReport,
    ) -> Option<String> {
        let token = sanitize_text_field(raw);
        if token.is_empty() {
            debug!("empty auth token submitted, keeping stored token");
            return None;
        }

        let outcome = if base_url.is_empty() {
            Err(ValidationError::TokenRejected(
                "no instance url configured".to_string(),
            ))
        } else {
            self.verifier
                .verify_token(base_url, &token)
                .await
                .map_err(|err| ValidationError::TokenRejected(err.to_string()))
        };

        match outcome {
            Ok(()) => Some(token),
            Err(err) => {
                if let ValidationError::TokenRejected(reason) = &err {
                    warn!(reason = %reason, "auth token rejected");
                }
                self.notices.record(Notice::error(AUTH_ERROR, err.to_string()));
                report.reject(OptionKey::AuthToken, &err);
                None
            }
        }
    }

    async fn blocking<F, R>(&self, work: F) -> Result<R, StoreError>
    where
        F: FnOnce(&dyn OptionStore) -> Result<R, StoreError> + Send + 'static,
        R: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || work(store.as_ref()))
            .await
            .map_err(|err| StoreError::Store(err.to_string()))?
    }
}

// Flags belong to the site that was selected when the form was rendered.
fn resolve_flags(stored_site_id: &str, submitted: &BTreeMap<String, Value>) -> Option<AdvancedOptions> {
    if stored_site_id.is_empty() {
        debug!("advanced options submitted before a site was selected, ignoring");
        return None;
    }
    let mut options = AdvancedOptions::new(stored_site_id);
    for flag in FlagName::ALL {
        let enabled = submitted.get(flag.as_str()).map(flag_value).unwrap_or(false);
        options.set(flag, enabled);
    }
    Some(options)
}

fn flag_value(value: &Value) -> bool {
    match value {
        Value::Bool(enabled) => *enabled,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(raw) => coerce_flag(raw),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}
