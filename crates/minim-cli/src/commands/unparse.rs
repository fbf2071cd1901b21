use std::fs;
use std::path::Path;

use minim_syntax::unparse_annotated;

use crate::error::CliError;

/// Analyze a file and print its canonical form with every resolved
/// identifier annotated. The output step is skipped whenever analysis
/// recorded a fatal error.
pub fn run(file: &Path, output: Option<&Path>) -> Result<bool, CliError> {
    let Some(analyzed) = super::analyze_file(file)? else {
        return Ok(false);
    };
    for error in analyzed.resolution.errors() {
        super::report(file, &analyzed.source, error.clone());
    }
    if !analyzed.resolution.ok() {
        return Ok(false);
    }

    let printed = unparse_annotated(&analyzed.program, &analyzed.resolution.annotator());
    match output {
        Some(path) => fs::write(path, printed).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            operation: "write".to_string(),
            source,
        })?,
        None => print!("{printed}"),
    }
    Ok(true)
}
