use shared_types::{AppConfig, FeatureFlags, RoleConfig};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Parse config file contents, falling back to defaults on malformed input.
fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(path = CONFIG_PATH, error = %e, "Failed to parse config; using defaults");
        AppConfig::default()
    })
}

/// Read `config.toml` and store it in the global `OnceLock`. Safe to call
/// multiple times — only the first call has effect.
///
/// If the file is missing or unparseable, every setting takes its default.
pub fn load_config() {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config = parse_config(&contents);
            tracing::info!(
                features = ?config.features,
                tie_break = ?config.roles.tie_break,
                "Loaded {CONFIG_PATH}"
            );
            config
        }
        Err(e) => {
            tracing::info!(path = CONFIG_PATH, error = %e, "Config not found; using defaults");
            AppConfig::default()
        }
    });
}

/// Get the loaded feature flags. Returns all-false defaults if
/// `load_config()` hasn't been called yet.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags { telemetry: false };
    CONFIG.get().map(|c| &c.features).unwrap_or(&DEFAULT)
}

/// Get the role lookup settings (lexical tie-break unless configured).
pub fn role_config() -> RoleConfig {
    CONFIG.get().map(|c| c.roles).unwrap_or_default()
}
