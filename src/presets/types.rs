//! Preset data structures
//!
//! - `Preset`: a named, ordered list of rename methods plus usage statistics
//! - `PresetStorage`: the TOML root holding every preset

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::methods::NameTransform;
use crate::pipeline::MethodPipeline;

use super::error::PresetError;

/// Saved rename pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preset {
    /// Unique preset name
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub created: DateTime<Utc>,

    pub last_used: DateTime<Utc>,

    #[serde(default)]
    pub use_count: u32,

    /// Methods in application order
    #[serde(rename = "method", default)]
    pub methods: Vec<NameTransform>,
}

impl Preset {
    #[must_use]
    pub fn new(name: String, description: String, methods: Vec<NameTransform>) -> Self {
        let now = Utc::now();
        Self {
            name,
            description,
            created: now,
            last_used: now,
            use_count: 0,
            methods,
        }
    }

    pub fn record_use(&mut self) {
        self.use_count += 1;
        self.last_used = Utc::now();
    }

    /// Check the name, and that the methods form a usable pipeline
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the name is invalid, the method list is empty,
    /// or a method does not compile.
    pub fn validate(&self) -> Result<(), PresetError> {
        validate_preset_name(&self.name)
            .map_err(|e| PresetError::InvalidName(self.name.clone(), e))?;
        if self.methods.is_empty() {
            return Err(PresetError::Empty(self.name.clone()));
        }
        MethodPipeline::new(self.methods.clone())?;
        Ok(())
    }
}

/// Storage container for all presets
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PresetStorage {
    #[serde(rename = "preset", default)]
    pub presets: Vec<Preset>,
}

impl PresetStorage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            presets: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Preset> {
        self.presets.iter_mut().find(|p| p.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.presets.iter().any(|p| p.name == name)
    }

    /// Add a preset; names are unique
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the name is taken or the preset is invalid.
    pub fn add(&mut self, preset: Preset) -> Result<(), PresetError> {
        if self.contains(&preset.name) {
            return Err(PresetError::AlreadyExists(preset.name));
        }
        preset.validate()?;
        self.presets.push(preset);
        Ok(())
    }

    /// Replace the preset with the same name
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if no such preset exists or the preset is invalid.
    pub fn update(&mut self, preset: Preset) -> Result<(), PresetError> {
        preset.validate()?;
        match self.get_mut(&preset.name) {
            Some(existing) => {
                *existing = preset;
                Ok(())
            }
            None => Err(PresetError::NotFound(preset.name)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Preset> {
        let pos = self.presets.iter().position(|p| p.name == name)?;
        Some(self.presets.remove(pos))
    }

    #[must_use]
    pub fn list_names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Validate a preset name
///
/// Preset names are 1-64 characters of alphanumerics, `-` and `_`.
///
/// # Errors
///
/// Returns a description of the first rule the name breaks.
pub fn validate_preset_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Preset name cannot be empty".to_string());
    }

    if name.len() > 64 {
        return Err(format!("Preset name too long (max 64 chars): {}", name.len()));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(format!(
            "Preset name '{name}' contains invalid characters (only alphanumeric, '-', and '_' allowed)"
        ));
    }

    Ok(())
}
