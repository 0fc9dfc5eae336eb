//! Configuration loading and resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "EXPLORE_CONFIG";

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listen address for the HTTP server
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Path to the editorial SQLite database
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Item rendered by /api/item when no qid parameter is supplied.
    /// An explicit request parameter always takes precedence.
    #[serde(default)]
    pub default_item: Option<String>,

    #[serde(default)]
    pub wikidata: WikidataConfig,

    #[serde(default)]
    pub graph: GraphConfig,
}

/// Remote knowledge-graph endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikidataConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Sent on every request; the query service requires a descriptive agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-call timeout. One bounded attempt, no retries.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Language for labels, descriptions and the Wikipedia sitelink
    #[serde(default = "default_language")]
    pub language: String,

    /// Row cap for class tables (applied inside the query)
    #[serde(default = "default_class_table_limit")]
    pub class_table_limit: usize,
}

/// Bounds for the on-demand neighborhood graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Relation properties followed when building the neighborhood
    #[serde(default = "default_graph_relations")]
    pub relations: Vec<String>,

    /// Maximum nodes returned; results beyond the cap are dropped and the
    /// response is marked truncated
    #[serde(default = "default_graph_node_cap")]
    pub node_cap: usize,
}

fn default_bind_address() -> String {
    "127.0.0.1:5780".to_string()
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("explore").join("explore.db"))
        .unwrap_or_else(|| PathBuf::from("./explore_data/explore.db"))
}

fn default_endpoint() -> String {
    "https://query.wikidata.org/sparql".to_string()
}

fn default_user_agent() -> String {
    format!(
        "Explore/{} (https://explore.ac; contact@explore.ac)",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

fn default_class_table_limit() -> usize {
    200
}

fn default_graph_relations() -> Vec<String> {
    ["P31", "P279", "P361", "P527", "P800", "P50"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_graph_node_cap() -> usize {
    50
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            database_path: default_database_path(),
            default_item: None,
            wikidata: WikidataConfig::default(),
            graph: GraphConfig::default(),
        }
    }
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
            language: default_language(),
            class_table_limit: default_class_table_limit(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            relations: default_graph_relations(),
            node_cap: default_graph_node_cap(),
        }
    }
}

/// Locate the config file following the priority order.
///
/// Returns None when no file exists anywhere; the caller then runs on
/// compiled defaults.
pub fn resolve_config_file(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    // Priority 3: platform config directory
    let user_config = dirs::config_dir().map(|d| d.join("explore").join("explore.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }
    let system_config = PathBuf::from("/etc/explore/explore.toml");
    if system_config.exists() {
        return Some(system_config);
    }

    None
}

/// Load configuration, falling back to defaults when no file is found.
///
/// A config file named explicitly (CLI or env) must exist and parse; a
/// missing default-location file is not an error.
pub fn load_config(cli_arg: Option<&Path>) -> Result<AppConfig> {
    let explicit = cli_arg.is_some() || std::env::var(CONFIG_ENV_VAR).is_ok();

    let Some(path) = resolve_config_file(cli_arg) else {
        return Ok(AppConfig::default());
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if !explicit => {
            tracing::warn!("Config file {} unreadable ({}), using defaults", path.display(), e);
            return Ok(AppConfig::default());
        }
        Err(e) => {
            return Err(Error::Config(format!(
                "cannot read config file {}: {}",
                path.display(),
                e
            )))
        }
    };

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))
}
