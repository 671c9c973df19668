//! Config Command
//!
//! Manage CommentLens configuration.
//!
//! Usage:
//!   commentlens config show [-g] [-f json|toml]
//!   commentlens config path
//!   commentlens config init [-g] [--force]

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::types::{LensError, Result};

/// Show configuration
pub fn show(global: bool, format: &str) -> Result<()> {
    let as_json = match format.to_lowercase().as_str() {
        "json" => true,
        "toml" | "text" => false,
        other => {
            return Err(LensError::Config(format!(
                "Unknown config format: {}. Valid values: json, toml",
                other
            )));
        }
    };

    if global {
        match ConfigLoader::global_config_path() {
            Some(global_path) if global_path.exists() => {
                let config = ConfigLoader::load_from_file(&global_path)?;
                println!("# Global Config: {}\n", global_path.display());
                println!("{}", ConfigLoader::render_config(&config, as_json)?);
            }
            Some(_) => {
                println!("No global config found.");
                println!("Run 'commentlens config init --global' to create one.");
            }
            None => println!("Cannot determine global config directory."),
        }
    } else {
        // Merged effective config
        let config = ConfigLoader::load()?;
        println!("{}", ConfigLoader::render_config(&config, as_json)?);
    }
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Initialize global configuration
pub fn init_global(force: bool) -> Result<()> {
    let config_path = ConfigLoader::init_global(force)?;
    Output::new().success("Initialized global configuration");
    println!("  Config: {}", config_path.display());
    Ok(())
}

/// Initialize project configuration
pub fn init_project(force: bool) -> Result<()> {
    let config_path = ConfigLoader::init_project(force)?;
    Output::new().success("Initialized project configuration");
    println!("  Config: {}", config_path.display());
    Ok(())
}
