//! Configuration loading from TOML files
//!
//! The config file is selected via the --config command line flag
//! (default: config/dev.toml). A missing or unparsable file falls back to
//! built-in defaults with a warning instead of aborting.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    /// Location names in display order; Lost and Traveling are appended
    /// at startup if the list omits them
    pub locations: Vec<String>,
    /// Tracked people in display order; duplicates collapse silently
    pub people: Vec<String>,
    /// Selects the default log filter (debug vs info)
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    /// Root of the presence topic tree; the client subscribes {base_topic}/#
    #[serde(default = "default_base_topic")]
    pub base_topic: String,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn default_base_topic() -> String {
    "owntracks".to_string()
}

fn default_client_id() -> String {
    "whereclock".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// State server port (0 to disable)
    #[serde(default = "default_http_port")]
    pub port: u16,
}

fn default_http_port() -> u16 {
    8228
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { port: default_http_port() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub clock: ClockConfig,
    pub mqtt: MqttConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    locations: Vec<String>,
    people: Vec<String>,
    debug: bool,
    mqtt_host: String,
    mqtt_port: u16,
    mqtt_base_topic: String,
    mqtt_client_id: String,
    mqtt_username: Option<String>,
    mqtt_password: Option<String>,
    http_port: u16,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locations: vec!["Home".to_string(), "School".to_string(), "Work".to_string()],
            people: Vec::new(),
            debug: false,
            mqtt_host: "localhost".to_string(),
            mqtt_port: 1883,
            mqtt_base_topic: "owntracks".to_string(),
            mqtt_client_id: "whereclock".to_string(),
            mqtt_username: None,
            mqtt_password: None,
            http_port: 8228,
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            locations: toml_config.clock.locations,
            people: toml_config.clock.people,
            debug: toml_config.clock.debug,
            mqtt_host: toml_config.mqtt.host,
            mqtt_port: toml_config.mqtt.port,
            mqtt_base_topic: toml_config.mqtt.base_topic,
            mqtt_client_id: toml_config.mqtt.client_id,
            mqtt_username: toml_config.mqtt.username,
            mqtt_password: toml_config.mqtt.password,
            http_port: toml_config.http.port,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries the TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {e:#}. Using defaults.");
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn people(&self) -> &[String] {
        &self.people
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn mqtt_host(&self) -> &str {
        &self.mqtt_host
    }

    pub fn mqtt_port(&self) -> u16 {
        self.mqtt_port
    }

    pub fn mqtt_base_topic(&self) -> &str {
        &self.mqtt_base_topic
    }

    pub fn mqtt_client_id(&self) -> &str {
        &self.mqtt_client_id
    }

    pub fn mqtt_username(&self) -> Option<&str> {
        self.mqtt_username.as_deref()
    }

    pub fn mqtt_password(&self) -> Option<&str> {
        self.mqtt_password.as_deref()
    }

    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    // Builder-style helpers for tests

    pub fn with_locations<I: IntoIterator<Item = S>, S: Into<String>>(mut self, locations: I) -> Self {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_people<I: IntoIterator<Item = S>, S: Into<String>>(mut self, people: I) -> Self {
        self.people = people.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_base_topic(mut self, base_topic: impl Into<String>) -> Self {
        self.mqtt_base_topic = base_topic.into();
        self
    }

    pub fn with_http_port(mut self, port: u16) -> Self {
        self.http_port = port;
        self
    }
}
