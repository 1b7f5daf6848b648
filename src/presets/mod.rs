//! Preset management
//!
//! A preset is a named, ordered list of rename methods saved for reuse.
//! Presets are stored in TOML at `~/.config/refile/presets.toml` by default;
//! the location can be changed with `presets_file` in the refile configuration.
//!
//! ```no_run
//! use refile::NameTransform;
//! use refile::presets::PresetManager;
//! use std::path::PathBuf;
//!
//! let manager = PresetManager::new(PathBuf::from("presets.toml"));
//! manager
//!     .create("underscores", "Spaces to underscores".to_string(), vec![NameTransform::replace(" ", "_")])
//!     .unwrap();
//! let preset = manager.get("underscores").unwrap();
//! println!("{}: {} method(s)", preset.name, preset.methods.len());
//! ```

pub mod error;
pub mod operations;
pub mod types;

pub use error::PresetError;
pub use operations::PresetManager;
pub use types::{Preset, PresetStorage, validate_preset_name};

use crate::config::RefileConfig;

/// Manager for the presets file named by `config`
///
/// # Errors
///
/// Returns `PresetError` if the config directory cannot be determined.
pub fn manager_for(config: &RefileConfig) -> Result<PresetManager, PresetError> {
    Ok(PresetManager::new(config.presets_path()?))
}
