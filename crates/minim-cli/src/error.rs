use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Failures of the driver itself, as opposed to diagnostics about the
/// program being compiled.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to {operation} `{path}`")]
    #[diagnostic(code(minim::cli::io_error))]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}
