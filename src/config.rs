//! Configuration management for the PDI engine

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::models::enums::SignoffRole;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InspectionsConfig {
    /// Refuse completion while a required item is still pending
    pub require_required_items_resolved: bool,
    /// Roles allowed to approve a completed inspection (empty = any role)
    pub approver_roles: Vec<SignoffRole>,
}

/// Upper bound for the follow-up due offsets
pub const MAX_DUE_DAYS: i64 = 3650;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TasksConfig {
    pub due_days_in_progress: i64,
    pub due_days_otherwise: i64,
}

impl TasksConfig {
    /// Both offsets must lie in `0..=MAX_DUE_DAYS`
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, days) in [
            ("tasks.due_days_in_progress", self.due_days_in_progress),
            ("tasks.due_days_otherwise", self.due_days_otherwise),
        ] {
            if !(0..=MAX_DUE_DAYS).contains(&days) {
                return Err(ConfigError::Message(format!(
                    "{} must be between 0 and {}, got {}",
                    key, MAX_DUE_DAYS, days
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EventsConfig {
    pub channel_capacity: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    /// JSON file holding an array of templates to load at boot
    pub templates_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub inspections: InspectionsConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // PDI_INSPECTIONS__APPROVER_ROLES=supervisor,manager
            .add_source(
                Environment::with_prefix("PDI")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("inspections.approver_roles")
                    .try_parsing(true),
            )
            .set_override_option("seed.templates_file", env::var("PDI_SEED_TEMPLATES").ok())?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.tasks.validate()?;
        Ok(config)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for InspectionsConfig {
    fn default() -> Self {
        Self {
            require_required_items_resolved: false,
            approver_roles: vec![SignoffRole::Supervisor, SignoffRole::Manager],
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            due_days_in_progress: 1,
            due_days_otherwise: 2,
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { channel_capacity: 256 }
    }
}
