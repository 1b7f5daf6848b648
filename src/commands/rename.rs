//! Rename command implementation
//!
//! Builds the method list from a preset and `--method` flags, previews the
//! batch, asks for confirmation, and runs it on a worker thread.

use std::path::Path;

use colored::Colorize;
use dialoguer::Confirm;

use super::report;
use crate::cli::RenameArgs;
use crate::config::RefileConfig;
use crate::entry::FileEntry;
use crate::executor::BatchResult;
use crate::methods::NameTransform;
use crate::presets;
use crate::session::{Session, SessionOptions};
use crate::RefileError;

type Result<T> = std::result::Result<T, RefileError>;

/// Execute the rename command
///
/// Returns the result of the applied batch (or of the preview for a dry run).
///
/// # Errors
///
/// Returns `RefileError` if:
/// - No methods were given, or a method does not compile
/// - The preset cannot be loaded or saved
/// - The confirmation prompt fails
/// - The batch worker cannot be started
pub fn execute(args: &RenameArgs, config: &RefileConfig, quiet: bool) -> Result<BatchResult> {
    execute_with(args, config, quiet, confirm)
}

/// [`execute`] with the confirmation prompt supplied by the caller
///
/// `confirm` receives the prompt and its default answer. It is consulted
/// before applying unless `--yes` is given, and again for `--review`.
/// `quiet` only silences output.
///
/// # Errors
///
/// Same as [`execute`], plus any error returned by `confirm`.
pub fn execute_with(
    args: &RenameArgs,
    config: &RefileConfig,
    quiet: bool,
    mut confirm: impl FnMut(&str, bool) -> Result<bool>,
) -> Result<BatchResult> {
    let methods = collect_methods(args, config)?;

    let mut options = SessionOptions::from(config);
    options.validator.long_paths |= args.long_paths;
    options.check_existing_targets &= !args.no_target_check;
    let mut session = Session::new().with_options(options);

    let mut entries = load_entries(&session, &args.paths);
    let show = !quiet && !args.json;

    // Preview pass; also the whole run for --dry-run
    let preview = session.run_batch(&mut entries, &methods, true)?;
    if args.dry_run {
        if args.json {
            report::print_json(&preview)?;
        } else if !quiet {
            report::print_plan(&entries);
            println!("\n{}", "Dry run: no files were renamed.".yellow());
        }
        return Ok(preview);
    }

    if preview.success_count == 0 {
        if show {
            report::print_plan(&entries);
            println!("\nNothing to rename.");
        } else if args.json {
            report::print_json(&preview)?;
        }
        return Ok(preview);
    }

    if !args.yes {
        if show {
            report::print_plan(&entries);
        }
        if !confirm(&format!("Rename {} file(s)?", preview.success_count), true)? {
            if !quiet {
                println!("Operation cancelled.");
            }
            return Ok(BatchResult::new());
        }
    }

    let (mut entries, result) = run_on_worker(&mut session, entries, &methods)?;

    if args.json {
        report::print_json(&result)?;
    } else if show {
        report::print_summary(&result, "Rename");
    }

    if args.review && result.success_count > 0 && !confirm("Keep these changes?", true)? {
        if let Some(undone) = session.undo(&mut entries) {
            if !quiet {
                report::print_summary(&undone, "Undo");
            }
            return Ok(undone);
        }
    }

    Ok(result)
}

/// Preset methods first, then `--method` flags
///
/// Templates given on the command line take their counter defaults from the
/// configuration; stored presets keep their own.
fn collect_methods(args: &RenameArgs, config: &RefileConfig) -> Result<Vec<NameTransform>> {
    let mut methods = Vec::new();
    if let Some(name) = &args.preset {
        let manager = presets::manager_for(config)?;
        methods.extend(manager.get(name)?.methods);
        manager.record_use(name)?;
    }

    let cli_methods: Vec<NameTransform> = args
        .methods
        .iter()
        .cloned()
        .map(|method| match method {
            NameTransform::NewName(template) => NameTransform::NewName(
                template.with_counter(config.numbering_start, config.numbering_zeros),
            ),
            other => other,
        })
        .collect();

    if let Some(name) = &args.save_preset {
        if cli_methods.is_empty() {
            return Err(RefileError::InvalidInput(
                "--save-preset needs at least one --method".to_string(),
            ));
        }
        presets::manager_for(config)?.create(name, String::new(), cli_methods.clone())?;
        log::info!("saved preset '{name}'");
    }

    methods.extend(cli_methods);
    if methods.is_empty() {
        return Err(RefileError::InvalidInput(
            "No rename methods given; use --method or --preset".to_string(),
        ));
    }
    Ok(methods)
}

fn load_entries(session: &Session, paths: &[impl AsRef<Path>]) -> Vec<FileEntry> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            if !path.exists() {
                log::warn!("{} does not exist", path.display());
            }
            session.entry_for(path)
        })
        .collect()
}

/// Run the real batch on the session's worker and wait for it
fn run_on_worker(
    session: &mut Session,
    entries: Vec<FileEntry>,
    methods: &[NameTransform],
) -> Result<(Vec<FileEntry>, BatchResult)> {
    let handle = session.spawn_batch(entries, methods, false)?;
    let outcome = handle.wait_with(|progress| {
        log::debug!("{}/{} {}", progress.processed, progress.total, progress.label);
    })?;
    Ok((outcome.entries, outcome.result))
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| RefileError::InvalidInput(format!("Failed to get confirmation: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDir;
    use std::cell::RefCell;
    use std::path::PathBuf;

    fn args(paths: Vec<PathBuf>, methods: &[&str]) -> RenameArgs {
        RenameArgs {
            paths,
            methods: methods
                .iter()
                .map(|m| NameTransform::try_from(*m).unwrap())
                .collect(),
            preset: None,
            save_preset: None,
            dry_run: false,
            yes: true,
            review: false,
            json: false,
            long_paths: false,
            no_target_check: false,
        }
    }

    fn config(dir: &TestDir) -> RefileConfig {
        RefileConfig {
            presets_file: Some(dir.path().join("presets.toml")),
            ..RefileConfig::default()
        }
    }

    #[test]
    fn test_rename_applies_methods() {
        let dir = TestDir::new();
        let paths = vec![dir.file("Holiday Photo.JPG")];
        let args = args(paths, &["case:lower:all", "replace: :_"]);

        let result = execute(&args, &config(&dir), true).unwrap();

        assert_eq!(result.success_count, 1);
        assert!(dir.exists("holiday_photo.jpg"));
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TestDir::new();
        let mut args = args(vec![dir.file("a.txt")], &["add:new_"]);
        args.dry_run = true;

        let result = execute(&args, &config(&dir), true).unwrap();

        assert_eq!(result.success_count, 1);
        assert!(result.renamed[0].is_preview);
        assert_eq!(dir.names(), ["a.txt"]);
    }

    #[test]
    fn test_template_counter_uses_config_defaults() {
        let dir = TestDir::new();
        let paths = vec![dir.file("a.txt"), dir.file("b.txt")];
        let args = args(paths, &["template:img_{n}"]);
        let config = RefileConfig {
            numbering_start: 10,
            numbering_zeros: 3,
            ..config(&dir)
        };

        execute(&args, &config, true).unwrap();

        assert_eq!(dir.names(), ["img_010.txt", "img_011.txt"]);
    }

    #[test]
    fn test_no_methods_is_invalid_input() {
        let dir = TestDir::new();
        let args = args(vec![dir.file("a.txt")], &[]);
        assert!(matches!(
            execute(&args, &config(&dir), true),
            Err(RefileError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_save_then_use_preset() {
        let dir = TestDir::new();
        let config = config(&dir);
        let mut saving = args(vec![dir.file("a.txt")], &["add:x_"]);
        saving.save_preset = Some("prefix".into());
        saving.dry_run = true;
        execute(&saving, &config, true).unwrap();

        let mut using = args(vec![dir.path().join("a.txt")], &[]);
        using.preset = Some("prefix".into());
        let result = execute(&using, &config, true).unwrap();

        assert_eq!(result.success_count, 1);
        assert!(dir.exists("x_a.txt"));
        assert!(!dir.exists("a.txt"));
    }

    #[test]
    fn test_conflicting_names_are_not_renamed() {
        let dir = TestDir::new();
        let paths = vec![dir.file("img1.png"), dir.file("img2.png")];
        let args = args(paths, &["template:photo"]);

        let result = execute(&args, &config(&dir), true).unwrap();

        assert_eq!(result.success_count, 0);
        assert_eq!(dir.names(), ["img1.png", "img2.png"]);
    }

    #[test]
    fn test_quiet_still_asks_before_renaming() {
        let dir = TestDir::new();
        let mut args = args(vec![dir.file("a.txt")], &["add:x_"]);
        args.yes = false;
        let prompts = RefCell::new(Vec::new());

        let result = execute_with(&args, &config(&dir), true, |prompt, _| {
            prompts.borrow_mut().push(prompt.to_string());
            Ok(false)
        })
        .unwrap();

        assert_eq!(prompts.into_inner(), ["Rename 1 file(s)?"]);
        assert_eq!(result.success_count, 0);
        assert_eq!(dir.names(), ["a.txt"]);
    }

    #[test]
    fn test_yes_skips_the_prompt() {
        let dir = TestDir::new();
        let args = args(vec![dir.file("a.txt")], &["add:x_"]);

        let result = execute_with(&args, &config(&dir), true, |_, _| {
            Err(RefileError::InvalidInput("unexpected prompt".into()))
        })
        .unwrap();

        assert_eq!(result.success_count, 1);
        assert_eq!(dir.names(), ["x_a.txt"]);
    }

    #[test]
    fn test_review_declined_undoes_batch() {
        let dir = TestDir::new();
        let mut args = args(vec![dir.file("a.txt")], &["add:x_"]);
        args.review = true;

        let result = execute_with(&args, &config(&dir), true, |_, _| Ok(false)).unwrap();

        assert_eq!(result.success_count, 1);
        assert_eq!(dir.names(), ["a.txt"]);
    }
}
