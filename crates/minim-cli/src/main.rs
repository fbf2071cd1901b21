use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

mod commands;
mod error;

#[derive(Parser, Debug)]
#[command(name = "minim")]
#[command(about = "Minim compiler front-end: parsing, name analysis and unparsing", long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Parse and name-check a source file
    Check {
        /// Source file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the analyzed program with symbol annotations
    Unparse {
        /// Source file to analyze
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write the output here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let result = match args.command {
        Command::Check { file } => commands::check::run(&file),
        Command::Unparse { file, output } => commands::unparse::run(&file, output.as_deref()),
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        // Diagnostics were already rendered; only the exit code is left.
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            ExitCode::FAILURE
        }
    }
}
