#[derive(Clone, Debug)]
pub struct StaticConfigItem {
    pub key: &'static str,
    pub description: &'static str,
    pub value_type: &'static str,
    pub default_value: &'static str,
}

pub static STATIC_CONFIG_TABLE: &[StaticConfigItem] = &[
    StaticConfigItem {
        key: "storage.sqlite_path",
        description: "SQLite database holding the plugin options",
        value_type: "string",
        default_value: "ghost_metrics.sqlite",
    },
    StaticConfigItem {
        key: "security.admin_token",
        description: "Bearer token for the admin API (admin API disabled when empty)",
        value_type: "string",
        default_value: "",
    },
    StaticConfigItem {
        key: "api.timeout_ms",
        description: "Timeout for calls to the Ghost Metrics instance in milliseconds",
        value_type: "number",
        default_value: "30000",
    },
    StaticConfigItem {
        key: "api.user_agent",
        description: "User agent sent to the Ghost Metrics instance",
        value_type: "string",
        default_value: "ghost-metrics-wp",
    },
    StaticConfigItem {
        key: "site.title",
        description: "Title of the demo page the head fragment is injected into",
        value_type: "string",
        default_value: "Ghost Metrics",
    },
];
