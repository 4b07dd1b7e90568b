use std::collections::HashSet;
use std::fs;

use anyhow::{bail, Result};
use parlor_core::AppConfig;
use parlor_models::user::UserSnapshot;
use parlor_util::validation::ABOUT_MAX_LENGTH;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub events: EventsConfig,
    /// Users and sessions loaded into the in-memory collaborators.
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ProfileConfig {
    #[serde(default = "default_about_max_length")]
    pub about_max_length: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            about_max_length: default_about_max_length(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EventsConfig {
    /// Capacity of the broadcast channel feeding connected sessions.
    #[serde(default = "default_bus_capacity")]
    pub bus_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            bus_capacity: default_bus_capacity(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub users: Vec<UserSnapshot>,
    #[serde(default)]
    pub sessions: Vec<SeedSession>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedSession {
    pub user_id: i64,
    pub perm_auth_key_id: i64,
}

fn default_about_max_length() -> usize {
    ABOUT_MAX_LENGTH
}
fn default_bus_capacity() -> usize {
    4096
}

fn generate_config_template(config: &Config) -> String {
    format!(
        r#"# Parlor Configuration
# Generated automatically on first run. Edit as needed.

[profile]
# Maximum biography length, in characters.
about_max_length = {about_max_length}

[events]
bus_capacity = {bus_capacity}

# Users known to the in-memory directory:
# [[seed.users]]
# id = 1
# first_name = "Anna"
# last_name = "Lee"
# username = "annalee"
# about = "hello"

# Connected sessions that print the updates they receive:
# [[seed.sessions]]
# user_id = 1
# perm_auth_key_id = 100
"#,
        about_max_length = config.profile.about_max_length,
        bus_capacity = config.events.bus_capacity,
    )
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if std::path::Path::new(path).exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            tracing::info!(
                "Config file not found at '{}', generating defaults...",
                path
            );
            let config = Config::default();

            // Ensure parent directory exists
            if let Some(parent) = std::path::Path::new(path).parent() {
                fs::create_dir_all(parent)?;
            }

            fs::write(path, generate_config_template(&config))?;
            tracing::info!("Generated default config at '{}'", path);
            config
        };

        // Environment variable overrides
        if let Ok(value) = std::env::var("PARLOR_ABOUT_MAX_LENGTH") {
            if let Ok(parsed) = value.parse::<usize>() {
                config.profile.about_max_length = parsed;
            }
        }
        if let Ok(value) = std::env::var("PARLOR_EVENT_BUS_CAPACITY") {
            if let Ok(parsed) = value.parse::<usize>() {
                config.events.bus_capacity = parsed;
            }
        }

        validate_configuration(&config)?;
        Ok(config)
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            about_max_length: self.profile.about_max_length,
        }
    }
}

fn validate_configuration(config: &Config) -> Result<()> {
    if config.profile.about_max_length == 0 {
        bail!("profile.about_max_length must be greater than zero");
    }
    if config.events.bus_capacity == 0 {
        bail!("events.bus_capacity must be greater than zero");
    }
    let mut seen = HashSet::new();
    for user in &config.seed.users {
        if !seen.insert(user.id) {
            bail!("seed.users contains user {} more than once", user.id);
        }
    }
    for session in &config.seed.sessions {
        if !seen.contains(&session.user_id) {
            tracing::warn!(
                user_id = session.user_id,
                "seed session refers to a user that is not seeded"
            );
        }
    }
    Ok(())
}
