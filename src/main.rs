//! Main entry point for the gzwalk CLI application.
//!
//! Parses the command line, picks the output sink (standard output or the
//! `--log` file), runs the walk and maps the outcome to the exit code.

use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use env_logger::{Env, Target};

use gzwalk::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_file = match cli.open_log() {
        Ok(file) => file,
        Err(err) => {
            eprintln!("gzwalk: {err:#}");
            return ExitCode::from(1);
        }
    };
    init_logger(log_file.as_ref());

    // No root: nothing to do.
    let Some(root) = cli.root() else {
        return ExitCode::SUCCESS;
    };

    let to_log_file = log_file.is_some();
    let sink: Box<dyn Write> = match log_file {
        Some(file) => Box::new(file),
        None => Box::new(io::stdout().lock()),
    };
    let mut config = cli.run_config(root, sink);

    let result = gzwalk::run(&mut config);
    let _ = config.sink_mut().flush();

    match result {
        Ok(summary) => {
            log::debug!("{summary:?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(config.sink_mut(), to_log_file, &err);
            ExitCode::from(1)
        }
    }
}

/// Set up `env_logger`, defaulting to warnings only.
///
/// With a log file, records are appended to the same file as the listing.
fn init_logger(log_file: Option<&File>) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));

    if let Some(file) = log_file {
        match file.try_clone() {
            Ok(clone) => {
                builder.target(Target::Pipe(Box::new(clone)));
            }
            Err(err) => eprintln!("gzwalk: cannot share log file with the logger: {err}"),
        }
    }

    builder.init();
}

/// Print a run error to the log file when one is configured, else to stderr.
fn report_error(sink: &mut dyn Write, to_log_file: bool, err: &gzwalk::Error) {
    if to_log_file && writeln!(sink, "gzwalk: {err}").and_then(|_| sink.flush()).is_ok() {
        return;
    }
    eprintln!("gzwalk: {err}");
}
