use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::options::OptionKey;
use crate::store::{OptionStore, StoreError};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedMode {
    #[default]
    Regular,
    TagManager,
}

impl EmbedMode {
    // Anything that is not exactly `tag_manager` falls back to `regular`.
    pub fn parse(input: &str) -> Self {
        match input {
            "tag_manager" => EmbedMode::TagManager,
            _ => EmbedMode::Regular,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmbedMode::Regular => "regular",
            EmbedMode::TagManager => "tag_manager",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagName {
    TrackSubdomains,
    PrependDomainToTitle,
    HideAliasUrls,
    TrackJsDisabled,
    CrossDomainLinking,
    ClientSideDnt,
    DisableTrackingCookies,
    DisableCampaignParameters,
}

impl FlagName {
    pub const ALL: [FlagName; 8] = [
        FlagName::TrackSubdomains,
        FlagName::PrependDomainToTitle,
        FlagName::HideAliasUrls,
        FlagName::TrackJsDisabled,
        FlagName::CrossDomainLinking,
        FlagName::ClientSideDnt,
        FlagName::DisableTrackingCookies,
        FlagName::DisableCampaignParameters,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FlagName::TrackSubdomains => "track_subdomains",
            FlagName::PrependDomainToTitle => "prepend_domain_to_title",
            FlagName::HideAliasUrls => "hide_alias_urls",
            FlagName::TrackJsDisabled => "track_js_disabled",
            FlagName::CrossDomainLinking => "cross_domain_linking",
            FlagName::ClientSideDnt => "client_side_dnt",
            FlagName::DisableTrackingCookies => "disable_tracking_cookies",
            FlagName::DisableCampaignParameters => "disable_campaign_parameters",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.as_str() == input)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedOptions {
    pub site_id: String,
    pub flags: BTreeMap<FlagName, bool>,
}

impl AdvancedOptions {
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            flags: BTreeMap::new(),
        }
    }

    pub fn with_flag(mut self, flag: FlagName, enabled: bool) -> Self {
        self.set(flag, enabled);
        self
    }

    pub fn set(&mut self, flag: FlagName, enabled: bool) {
        self.flags.insert(flag, enabled);
    }

    pub fn is_enabled(&self, flag: FlagName) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }

    pub fn resolved(&self) -> BTreeMap<FlagName, bool> {
        FlagName::ALL
            .into_iter()
            .map(|flag| (flag, self.is_enabled(flag)))
            .collect()
    }
}

type FlagTable = BTreeMap<String, BTreeMap<FlagName, bool>>;

fn load_flag_table(store: &dyn OptionStore) -> Result<FlagTable, StoreError> {
    let raw = store.get_option(OptionKey::AdvancedOptions)?;
    if raw.trim().is_empty() {
        return Ok(FlagTable::new());
    }
    let decoded: BTreeMap<String, BTreeMap<String, bool>> = match serde_json::from_str(&raw) {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(error = %err, "advanced options unreadable, using defaults");
            return Ok(FlagTable::new());
        }
    };
    Ok(decoded
        .into_iter()
        .map(|(site_id, flags)| {
            let flags: BTreeMap<FlagName, bool> = flags
                .into_iter()
                .filter_map(|(name, enabled)| match FlagName::parse(&name) {
                    Some(flag) => Some((flag, enabled)),
                    None => {
                        debug!(site_id = %site_id, flag = %name, "unknown advanced flag dropped");
                        None
                    }
                })
                .collect();
            (site_id, flags)
        })
        .collect())
}

pub fn load_advanced(store: &dyn OptionStore, site_id: &str) -> Result<AdvancedOptions, StoreError> {
    if site_id.is_empty() {
        return Ok(AdvancedOptions::default());
    }
    let mut table = load_flag_table(store)?;
    Ok(AdvancedOptions {
        site_id: site_id.to_string(),
        flags: table.remove(site_id).unwrap_or_default(),
    })
}

pub fn save_advanced(store: &dyn OptionStore, options: &AdvancedOptions) -> Result<(), StoreError> {
    if options.site_id.is_empty() {
        return Err(StoreError::Store(
            "advanced options require a site id".to_string(),
        ));
    }
    let mut table = load_flag_table(store)?;
    table.insert(options.site_id.clone(), options.flags.clone());
    let payload =
        serde_json::to_string(&table).map_err(|err| StoreError::Serialization(err.to_string()))?;
    store.set_option(OptionKey::AdvancedOptions, &payload)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub ghost_metrics_url: String,
    pub auth_token: String,
    pub embed_mode: EmbedMode,
    pub selected_site_id: String,
    pub selected_container_id: String,
    pub advanced: AdvancedOptions,
}

impl Settings {
    pub fn load(store: &dyn OptionStore) -> Result<Self, StoreError> {
        let selected_site_id = store.get_option(OptionKey::SelectedSiteId)?;
        let advanced = load_advanced(store, &selected_site_id)?;
        Ok(Self {
            ghost_metrics_url: store.get_option(OptionKey::GhostMetricsUrl)?,
            auth_token: store.get_option(OptionKey::AuthToken)?,
            embed_mode: EmbedMode::parse(&store.get_option(OptionKey::EmbedMode)?),
            selected_site_id,
            selected_container_id: store.get_option(OptionKey::SelectedContainerId)?,
            advanced,
        })
    }

    pub fn token_set(&self) -> bool {
        !self.auth_token.is_empty()
    }
}
