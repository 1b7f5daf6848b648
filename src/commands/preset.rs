//! Preset management command implementation
//!
//! - List all presets
//! - Show the methods of a preset
//! - Save a method list as a preset
//! - Delete a preset

use colored::Colorize;
use dialoguer::Confirm;

use crate::cli::PresetCommands;
use crate::config::RefileConfig;
use crate::methods::NameTransform;
use crate::presets::{self, PresetManager};
use crate::RefileError;

type Result<T> = std::result::Result<T, RefileError>;

/// Execute a preset management command
///
/// # Errors
///
/// Returns `RefileError` if preset storage cannot be accessed, the preset is
/// invalid or missing, or the confirmation prompt fails.
pub fn execute(command: &PresetCommands, config: &RefileConfig, quiet: bool) -> Result<()> {
    let manager = presets::manager_for(config)?;
    match command {
        PresetCommands::List => list_presets(&manager, quiet),
        PresetCommands::Show { name } => show_preset(&manager, name, quiet),
        PresetCommands::Save {
            name,
            methods,
            description,
            force,
        } => save_preset(
            &manager,
            name,
            methods,
            description.clone().unwrap_or_default(),
            *force,
            quiet,
        ),
        PresetCommands::Delete { name, force } => delete_preset(&manager, name, *force, quiet),
    }
}

fn list_presets(manager: &PresetManager, quiet: bool) -> Result<()> {
    let presets = manager.list()?;

    if presets.is_empty() {
        if !quiet {
            println!("No saved presets.");
            println!("Create one with: refile preset save <name> -m <method>...");
        }
        return Ok(());
    }

    if !quiet {
        println!("{}", "Saved Presets:".bold());
        println!();
    }

    let width = presets.iter().map(|p| p.name.len()).max().unwrap_or(0).max(4);

    for preset in presets {
        if quiet {
            println!("{}", preset.name);
            continue;
        }
        let desc = if preset.description.is_empty() {
            String::from("(no description)")
        } else {
            preset.description.clone()
        };
        println!(
            "  {}  {}  {}",
            format!("{:<width$}", preset.name).cyan(),
            desc,
            format!("[{} method(s), used {}x]", preset.methods.len(), preset.use_count).dimmed(),
        );
    }

    Ok(())
}

fn show_preset(manager: &PresetManager, name: &str, quiet: bool) -> Result<()> {
    let preset = manager.get(name)?;

    if quiet {
        for method in &preset.methods {
            println!("{method}");
        }
        return Ok(());
    }

    println!("Preset: {}", preset.name.cyan().bold());
    if !preset.description.is_empty() {
        println!("Description: {}", preset.description);
    }
    println!();
    println!("Methods:");
    for (i, method) in preset.methods.iter().enumerate() {
        println!("  {}. {method}", i + 1);
    }
    println!();
    println!("Created: {}", preset.created.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Last used: {}", preset.last_used.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Use count: {}", preset.use_count);

    Ok(())
}

fn save_preset(
    manager: &PresetManager,
    name: &str,
    methods: &[NameTransform],
    description: String,
    force: bool,
    quiet: bool,
) -> Result<()> {
    let preset = if force {
        manager.upsert(name, description, methods.to_vec())?
    } else {
        manager.create(name, description, methods.to_vec())?
    };

    if !quiet {
        println!(
            "Preset '{}' saved with {} method(s)",
            preset.name,
            preset.methods.len()
        );
    }
    Ok(())
}

fn delete_preset(manager: &PresetManager, name: &str, force: bool, quiet: bool) -> Result<()> {
    manager.get(name)?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete preset '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| RefileError::InvalidInput(format!("Failed to get confirmation: {e}")))?;
        if !confirmed {
            if !quiet {
                println!("Cancelled");
            }
            return Ok(());
        }
    }

    manager.delete(name)?;

    if !quiet {
        println!("Preset '{name}' deleted");
    }
    Ok(())
}
