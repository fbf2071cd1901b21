pub mod check;
pub mod unparse;

use std::fs;
use std::path::Path;

use log::debug;
use miette::{Diagnostic, NamedSource, Report};

use minim_resolve::{analyze_names, NameResolution};
use minim_syntax::ast::Program;
use minim_syntax::parse;

use crate::error::CliError;

/// Source text plus everything the front half produced for it.
pub(crate) struct Analyzed {
    pub source: String,
    pub program: Program,
    pub resolution: NameResolution,
}

/// Read, parse and name-check `file`.
///
/// Returns `Ok(None)` when a lexical or syntax error was found; the error
/// has already been rendered and later phases must not run.
pub(crate) fn analyze_file(file: &Path) -> Result<Option<Analyzed>, CliError> {
    debug!("analyzing {}", file.display());
    let source = fs::read_to_string(file).map_err(|source| CliError::Io {
        path: file.to_path_buf(),
        operation: "read".to_string(),
        source,
    })?;
    let program = match parse(&source) {
        Ok(program) => program,
        Err(error) => {
            report(file, &source, error);
            return Ok(None);
        }
    };
    let resolution = analyze_names(&program);
    Ok(Some(Analyzed { source, program, resolution }))
}

/// Render one diagnostic against its source file.
pub(crate) fn report(file: &Path, source: &str, error: impl Diagnostic + Send + Sync + 'static) {
    let report = Report::new(error)
        .with_source_code(NamedSource::new(file.to_string_lossy(), source.to_string()));
    eprintln!("{report:?}");
}
