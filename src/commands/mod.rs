//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and the loaded configuration.

pub mod preset;
pub mod rename;
pub mod report;

pub use preset::execute as preset;
pub use rename::execute as rename;

use colored::Colorize;

use crate::metadata::METADATA_TAGS;

const METHOD_SYNTAX: &[(&str, &str)] = &[
    ("replace:FIND:WITH", "Replace every FIND with WITH (case-sensitive)"),
    ("replace-i:FIND:WITH", "Replace, ignoring case"),
    ("regex:PATTERN:WITH", "Regex replacement; WITH may use $1 groups"),
    ("case:TYPE[:name|ext|all]", "upper lower capitalize title snake kebab camel pascal"),
    ("number[:START[:STEP[:DIGITS[:FMT[:POS]]]]]", "Counter; FMT marks the number with {n}"),
    ("add:TEXT[:start|end]", "Insert TEXT (default at the start)"),
    ("remove:TEXT", "Remove every occurrence of TEXT"),
    ("remove-chars:N[:start|end]", "Remove N characters (default from the end)"),
    ("remove-range:START[:END]", "Remove characters START..END"),
    ("meta:TAG[:start|end]", "Insert a metadata value, e.g. {width}x{height}"),
    ("template:TEMPLATE", "New name from {name} {ext} {n[:start[:zeros]]} {if:..:..:..}"),
];

/// Print the method syntax accepted by `--method`
pub fn methods(quiet: bool) {
    if !quiet {
        println!("{}", "Rename methods:".bold());
    }
    let width = METHOD_SYNTAX.iter().map(|(s, _)| s.len()).max().unwrap_or(0);
    for (syntax, help) in METHOD_SYNTAX {
        println!("  {}  {help}", format!("{syntax:<width$}").cyan());
    }
    if !quiet {
        println!("\n{} {}", "Metadata tags:".bold(), METADATA_TAGS.join(", "));
    }
}
