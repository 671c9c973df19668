//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/commentlens/config.toml)
//! 3. Project config (.commentlens/config.toml)
//! 4. Environment variables (COMMENTLENS_* prefix, `__` between sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{LensError, Result};

const ENV_PREFIX: &str = "COMMENTLENS_";
const PROJECT_DIR: &str = ".commentlens";
const CONFIG_FILE: &str = "config.toml";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_layers(
            Self::global_config_path().as_deref(),
            &Self::project_config_path(),
            ENV_PREFIX,
        )
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(LensError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| LensError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn load_layers(global: Option<&Path>, project: &Path, env_prefix: &str) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(global_path));
        }

        if project.exists() {
            debug!("Loading project config from: {}", project.display());
            figment = figment.merge(Toml::file(project));
        }

        // e.g. COMMENTLENS_ANALYSIS__DENSITY_THRESHOLD -> analysis.density_threshold
        figment = figment.merge(Env::prefixed(env_prefix).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| LensError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/commentlens/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("commentlens"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join(CONFIG_FILE)
    }

    /// Get project configuration directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(PROJECT_DIR)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Render the effective configuration as JSON or TOML
    pub fn render_config(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| LensError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            LensError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::write_default(&global_dir, force)
    }

    /// Initialize project configuration in the current directory
    pub fn init_project(force: bool) -> Result<PathBuf> {
        Self::init_project_at(Path::new("."), force)
    }

    /// Initialize project configuration under `root`
    pub fn init_project_at(root: &Path, force: bool) -> Result<PathBuf> {
        Self::write_default(&root.join(PROJECT_DIR), force)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn write_default(dir: &Path, force: bool) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_config())?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Generate default config content (TOML)
    fn default_config() -> String {
        r#"# CommentLens Configuration
# Project settings in .commentlens/config.toml override global ones.
# Environment variables override both, e.g.
#   COMMENTLENS_ANALYSIS__DENSITY_THRESHOLD=3.0

version = "1.0"

[analysis]
# Cosine similarity a comment pair must exceed to count as a duplicate
duplicate_threshold = 0.85
# Comments per function/method a file must exceed to count as dense
density_threshold = 2.5

[scan]
# Directory names to skip in addition to venv, node_modules, .git,
# __pycache__, build and dist
exclude_dirs = []
# Glob patterns relative to the scanned root
exclude = []
max_file_size = 1048576
respect_gitignore = false

[output]
# text, json or yaml
format = "text"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    const TEST_PREFIX: &str = "COMMENTLENS_LOADER_TEST_UNSET_";

    #[test]
    fn test_load_defaults_without_files() {
        let dir = TempDir::new().unwrap();
        let config =
            ConfigLoader::load_layers(None, &dir.path().join("missing.toml"), TEST_PREFIX)
                .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_config_text_parses_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = ConfigLoader::init_project_at(dir.path(), false).unwrap();
        assert!(path.ends_with(".commentlens/config.toml"));

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_project_overrides_global() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        fs::write(
            &global,
            "[analysis]\nduplicate_threshold = 0.7\ndensity_threshold = 5.0\n",
        )
        .unwrap();
        fs::write(&project, "[analysis]\ndensity_threshold = 3.0\n").unwrap();

        let config = ConfigLoader::load_layers(Some(&global), &project, TEST_PREFIX).unwrap();
        assert_eq!(config.analysis.duplicate_threshold, 0.7);
        assert_eq!(config.analysis.density_threshold, 3.0);
    }

    #[test]
    fn test_env_override() {
        let prefix = "COMMENTLENS_LOADER_TEST_ENV_";
        // SAFETY: the variable uses a prefix no other test reads
        unsafe {
            std::env::set_var(format!("{}ANALYSIS__DENSITY_THRESHOLD", prefix), "4.5");
            std::env::set_var(format!("{}OUTPUT__FORMAT", prefix), "json");
        }
        let dir = TempDir::new().unwrap();
        let config =
            ConfigLoader::load_layers(None, &dir.path().join("none.toml"), prefix).unwrap();
        unsafe {
            std::env::remove_var(format!("{}ANALYSIS__DENSITY_THRESHOLD", prefix));
            std::env::remove_var(format!("{}OUTPUT__FORMAT", prefix));
        }

        assert_eq!(config.analysis.density_threshold, 4.5);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("config.toml");
        fs::write(&project, "[analysis]\nduplicate_threshold = 1.5\n").unwrap();

        let err = ConfigLoader::load_layers(None, &project, TEST_PREFIX).unwrap_err();
        assert!(matches!(err, LensError::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("config.toml");
        fs::write(&project, "[analysis\n").unwrap();

        let err = ConfigLoader::load_layers(None, &project, TEST_PREFIX).unwrap_err();
        assert!(matches!(err, LensError::Config(_)));
    }

    #[test]
    fn test_init_respects_force() {
        let dir = TempDir::new().unwrap();
        let path = ConfigLoader::init_project_at(dir.path(), false).unwrap();
        fs::write(&path, "version = \"custom\"\n").unwrap();

        ConfigLoader::init_project_at(dir.path(), false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = \"custom\"\n");

        ConfigLoader::init_project_at(dir.path(), true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[analysis]"));
    }

    #[test]
    fn test_render_config() {
        let config = Config::default();
        let json = ConfigLoader::render_config(&config, true).unwrap();
        assert!(json.contains("\"duplicate_threshold\": 0.85"));

        let toml_text = ConfigLoader::render_config(&config, false).unwrap();
        assert!(toml_text.contains("[analysis]"));
        assert!(toml_text.contains("density_threshold = 2.5"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::load_from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, LensError::Config(_)));
    }
}
