use std::path::Path;

use crate::error::CliError;

/// Lex, parse and name-check one source file, rendering every diagnostic.
/// Returns whether the file came through clean.
pub fn run(file: &Path) -> Result<bool, CliError> {
    let Some(analyzed) = super::analyze_file(file)? else {
        return Ok(false);
    };
    for error in analyzed.resolution.errors() {
        super::report(file, &analyzed.source, error.clone());
    }
    if analyzed.resolution.ok() {
        println!("{}: no naming errors", file.display());
    }
    Ok(analyzed.resolution.ok())
}
