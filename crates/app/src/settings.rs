//! Layered settings: optional TOML file, then `GLWALKER_*` environment
//! variables, then command-line overrides.
//!
//! Nested keys use `__` in the environment, e.g. `GLWALKER_API__BASE_URL`.

use engine::FailurePolicy;
use serde::Deserialize;

use crate::{
    cli::GlobalArgs,
    error::{AppError, Result},
};

const DEFAULT_CONFIG_PATH: &str = "config/glwalker.toml";
const ENV_PREFIX: &str = "GLWALKER";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub verify_ssl: bool,
    pub timeout_secs: u64,
    pub max_pages: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            verify_ssl: true,
            timeout_secs: 60,
            max_pages: rest_client::DEFAULT_MAX_PAGES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    /// SQLite file of the metadata store, or `:memory:`.
    pub database: String,
    /// Ledger definition file.
    pub catalog: String,
    pub log_level: String,
    pub failure_policy: FailurePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            database: migration::DEFAULT_DATABASE.to_string(),
            catalog: "lg_list.json".to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl Settings {
    /// Connection string of the metadata store.
    pub fn database_url(&self) -> String {
        migration::sqlite_url(&self.database)
    }
}

pub fn load(args: &GlobalArgs) -> Result<Settings> {
    build(args, None)
}

/// `env` replaces the process environment when given.
fn build(args: &GlobalArgs, env: Option<config::Map<String, String>>) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(env),
    );
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &args.base_url {
        settings.api.base_url = base_url.clone();
    }
    if let Some(username) = &args.username {
        settings.api.username = username.clone();
    }
    if args.insecure {
        settings.api.verify_ssl = false;
    }
    if let Some(database) = &args.database {
        settings.database = database.clone();
    }
    if let Some(catalog) = &args.catalog {
        settings.catalog = catalog.clone();
    }
    if let Some(level) = &args.log_level {
        settings.log_level = level.clone();
    }
    if let Some(policy) = args.failure_policy {
        settings.failure_policy = policy;
    }

    require(&settings.api.base_url, "api.base_url")?;
    require(&settings.api.username, "api.username")?;
    require(&settings.api.password, "api.password")?;
    Ok(settings)
}

fn require(value: &str, key: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::MissingSetting(key));
    }
    Ok(())
}
