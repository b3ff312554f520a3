#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OptionKey {
    GhostMetricsUrl,
    AuthToken,
    EmbedMode,
    SelectedSiteId,
    SelectedContainerId,
    AdvancedOptions,
}

impl OptionKey {
    pub const ALL: [OptionKey; 6] = [
        OptionKey::GhostMetricsUrl,
        OptionKey::AuthToken,
        OptionKey::EmbedMode,
        OptionKey::SelectedSiteId,
        OptionKey::SelectedContainerId,
        OptionKey::AdvancedOptions,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OptionKey::GhostMetricsUrl => "ghost_metrics_url",
            OptionKey::AuthToken => "auth_token",
            OptionKey::EmbedMode => "embed_mode",
            OptionKey::SelectedSiteId => "selected_site_id",
            OptionKey::SelectedContainerId => "selected_container_id",
            OptionKey::AdvancedOptions => "advanced_options",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            OptionKey::EmbedMode => "regular",
            // JSON object: site id -> flag map
            OptionKey::AdvancedOptions => "{}",
            _ => "",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}
