use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::static_config::{StaticConfigItem, STATIC_CONFIG_TABLE};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    values: HashMap<String, String>,
}

impl SystemConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get(key)
            .map(str::to_string)
            .or_else(|| default_value(key))
            .unwrap_or_default()
    }

    pub fn get_number(&self, key: &str) -> i64 {
        self.get(key)
            .and_then(|value| value.parse::<i64>().ok())
            .or_else(|| default_value(key).and_then(|value| value.parse::<i64>().ok()))
            .unwrap_or_default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("type mismatch for key {0}: expected {1}")]
    TypeMismatch(String, String),
}

pub struct SystemConfigLoader;

impl SystemConfigLoader {
    pub fn from_str(input: &str) -> Result<SystemConfig, ConfigError> {
        let value: toml::Value =
            toml::from_str(input).map_err(|err| ConfigError::Parse(err.to_string()))?;
        let mut values = HashMap::new();
        collect_values(&mut values, "", &value)?;
        Ok(SystemConfig { values })
    }

    pub fn default_template() -> String {
        let mut sections: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for item in STATIC_CONFIG_TABLE {
            let Some((section, key)) = item.key.split_once('.') else {
                continue;
            };
            let value = match item.value_type {
                "string" => format!("{key} = \"{}\"", item.default_value),
                _ => format!("{key} = {}", item.default_value),
            };
            sections.entry(section).or_default().push(value);
        }
        let lines: Vec<String> = sections
            .into_iter()
            .map(|(section, entries)| format!("{section} = {{ {} }}", entries.join(", ")))
            .collect();
        format!("{}\n", lines.join("\n"))
    }
}

fn collect_values(
    output: &mut HashMap<String, String>,
    prefix: &str,
    value: &toml::Value,
) -> Result<(), ConfigError> {
    let (raw, found_type) = match value {
        toml::Value::Table(table) => {
            for (key, nested) in table {
                let path = if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_values(output, &path, nested)?;
            }
            return Ok(());
        }
        toml::Value::String(value) => (value.to_string(), "string"),
        toml::Value::Integer(value) => (value.to_string(), "number"),
        toml::Value::Float(value) => (value.to_string(), "number"),
        toml::Value::Boolean(value) => (value.to_string(), "boolean"),
        _ => {
            return Err(ConfigError::TypeMismatch(
                prefix.to_string(),
                "string|number|boolean".to_string(),
            ))
        }
    };

    let item = config_item(prefix).ok_or_else(|| ConfigError::UnknownKey(prefix.to_string()))?;
    if item.value_type != found_type {
        return Err(ConfigError::TypeMismatch(
            prefix.to_string(),
            item.value_type.to_string(),
        ));
    }
    output.insert(prefix.to_string(), raw);
    Ok(())
}

fn config_item(key: &str) -> Option<&'static StaticConfigItem> {
    STATIC_CONFIG_TABLE.iter().find(|item| item.key == key)
}

fn default_value(key: &str) -> Option<String> {
    config_item(key).map(|item| item.default_value.to_string())
}
