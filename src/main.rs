//! Droidgen - Android Studio project exporter
//!
//! Command-line entry point: loads the project file and drives a
//! generation pass.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use tracing::{error, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use droidgen::commands::{ExportCommand, InitCommand};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "usage:
  droidgen export [--project <dir>] [--out <dir>]
  droidgen init [--project <dir>] [--name <name>]";

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::INFO.into())),
        )
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to set up logging");
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("export") => {
            let (project_dir, output_dir, _) = parse_common(&args[1..])?;
            ExportCommand { project_dir, output_dir }.execute().await?;
            Ok(())
        }
        Some("init") => {
            let (project_dir, _, name) = parse_common(&args[1..])?;
            InitCommand { project_dir, name }.execute().await?;
            Ok(())
        }
        Some("--version") => {
            println!("droidgen {VERSION}");
            Ok(())
        }
        _ => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

/// Parse `--project`, `--out` and `--name` flags shared by the
/// subcommands.
fn parse_common(args: &[String]) -> Result<(PathBuf, Option<PathBuf>, Option<String>)> {
    let mut project_dir = PathBuf::from(".");
    let mut output_dir = None;
    let mut name = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--project" => {
                project_dir = PathBuf::from(
                    iter.next().ok_or_else(|| anyhow::anyhow!("--project needs a value"))?,
                );
            }
            "--out" => {
                output_dir = Some(PathBuf::from(
                    iter.next().ok_or_else(|| anyhow::anyhow!("--out needs a value"))?,
                ));
            }
            "--name" => {
                name = Some(
                    iter.next()
                        .ok_or_else(|| anyhow::anyhow!("--name needs a value"))?
                        .clone(),
                );
            }
            other => anyhow::bail!("unknown argument: {other}\n{USAGE}"),
        }
    }

    Ok((project_dir, output_dir, name))
}
