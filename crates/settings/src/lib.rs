pub mod config;
pub mod form;
pub mod model;
pub mod notice;
pub mod options;
pub mod sqlite_store;
pub mod static_config;
pub mod store;
pub mod validate;

pub use config::{ConfigError, SystemConfig, SystemConfigLoader};
pub use form::{
    RejectedField, SaveReport, SettingsForm, SettingsSubmission, TokenVerifier, VerificationError,
};
pub use model::{load_advanced, save_advanced, AdvancedOptions, EmbedMode, FlagName, Settings};
pub use notice::{InMemoryNoticeSink, Notice, NoticeLevel, NoticeSink};
pub use options::OptionKey;
pub use sqlite_store::SqliteOptionStore;
pub use store::{InMemoryOptionStore, OptionStore, StoreError};
pub use validate::{coerce_flag, sanitize_text_field, validate_url, ValidationError};
