//! `nrbf` — command-line front end for the NRBF record decoder.
//!
//! Argument parsing, logger initialization, and delegation to `nrbf_cli`
//! (lib) happen here; the decode itself lives in `nrbf-core`.

#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "nrbf", version, about = "Decode a .NET Remoting Binary Format (NRBF) stream", long_about = None)]
struct Opt {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (overrides verbosity)
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode an NRBF stream and print its XML rendering to stdout
    Decode {
        /// Path to the NRBF-encoded file
        path: Option<PathBuf>,
    },
}

fn init_telemetry(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let opt = Opt::parse();
    init_telemetry(opt.verbose, opt.quiet);

    match opt.cmd {
        Command::Decode { path } => match path {
            None => {
                println!("No file was given.");
                ExitCode::from(1)
            }
            Some(path) => match nrbf_cli::decode_file_to_xml(&path) {
                Ok(xml) => {
                    print!("{xml}");
                    ExitCode::from(0)
                }
                Err(err) => {
                    eprintln!("Error: {err:#}");
                    ExitCode::from(1)
                }
            },
        },
    }
}
