//! Preset CRUD operations

use std::fs;
use std::path::{Path, PathBuf};

use super::error::PresetError;
use super::types::{Preset, PresetStorage};
use crate::methods::NameTransform;

/// Manager for saved presets
///
/// Encapsulates the storage path; every operation loads the file, applies
/// the change and writes it back.
///
/// # Examples
///
/// ```no_run
/// use refile::presets::PresetManager;
/// use std::path::PathBuf;
///
/// let manager = PresetManager::new(PathBuf::from("~/.config/refile/presets.toml"));
/// let presets = manager.list().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PresetManager {
    path: PathBuf,
    auto_backup: bool,
}

impl PresetManager {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            auto_backup: true,
        }
    }

    #[must_use]
    pub const fn without_backup(path: PathBuf) -> Self {
        Self {
            path,
            auto_backup: false,
        }
    }

    /// Returns an empty storage if the file doesn't exist
    fn load(&self) -> Result<PresetStorage, PresetError> {
        if !self.path.exists() {
            return Ok(PresetStorage::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let storage: PresetStorage = toml::from_str(&contents)?;
        Ok(storage)
    }

    /// Write the storage, keeping the previous file as `.toml.backup`
    fn save(&self, storage: &PresetStorage) -> Result<(), PresetError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        if self.auto_backup && self.path.exists() {
            let backup_path = self.path.with_extension("toml.backup");
            fs::copy(&self.path, backup_path)?;
        }

        let toml = toml::to_string_pretty(storage)?;
        fs::write(&self.path, toml)?;

        Ok(())
    }

    /// Save a new preset
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if:
    /// - The preset name is invalid or already taken
    /// - The method list is empty or does not compile
    /// - The storage file cannot be read or written
    pub fn create(
        &self,
        name: &str,
        description: String,
        methods: Vec<NameTransform>,
    ) -> Result<Preset, PresetError> {
        let mut storage = self.load()?;
        let preset = Preset::new(name.to_string(), description, methods);
        storage.add(preset.clone())?;
        self.save(&storage)?;
        log::debug!("saved preset '{name}' to {}", self.path.display());
        Ok(preset)
    }

    /// Create the preset, or replace the methods of an existing one
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the preset is invalid or storage fails.
    pub fn upsert(
        &self,
        name: &str,
        description: String,
        methods: Vec<NameTransform>,
    ) -> Result<Preset, PresetError> {
        let mut storage = self.load()?;
        let preset = match storage.get(name) {
            Some(existing) => {
                let mut preset = existing.clone();
                preset.description = description;
                preset.methods = methods;
                storage.update(preset.clone())?;
                preset
            }
            None => {
                let preset = Preset::new(name.to_string(), description, methods);
                storage.add(preset.clone())?;
                preset
            }
        };
        self.save(&storage)?;
        Ok(preset)
    }

    /// Get a preset by name
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the storage file cannot be loaded or the
    /// preset is not found.
    pub fn get(&self, name: &str) -> Result<Preset, PresetError> {
        let storage = self.load()?;
        storage
            .get(name)
            .cloned()
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    /// Delete a preset by name
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the preset is not found or the storage file
    /// cannot be saved.
    pub fn delete(&self, name: &str) -> Result<Preset, PresetError> {
        let mut storage = self.load()?;
        let preset = storage
            .remove(name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))?;
        self.save(&storage)?;
        Ok(preset)
    }

    /// List all presets in storage order
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the storage file cannot be loaded.
    pub fn list(&self) -> Result<Vec<Preset>, PresetError> {
        Ok(self.load()?.presets)
    }

    /// Bump the use count and `last_used` of a preset
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the preset is not found or the storage file
    /// cannot be saved.
    pub fn record_use(&self, name: &str) -> Result<(), PresetError> {
        let mut storage = self.load()?;
        storage
            .get_mut(name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))?
            .record_use();
        self.save(&storage)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
