use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tempfile::NamedTempFile;

mod activity;
mod badge;
mod config;
mod error;
mod logging;
mod pipeline;
mod profile;
mod steam_api;
mod utils;

use config::Config;
use error::Error;
use steam_api::SteamClient;

const DEFAULT_OUTPUT: &str = "steam-widget.svg";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Steam Web API key
    #[arg(long, env = config::API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// SteamID64 of the player shown on the badge
    #[arg(long, env = config::STEAM_ID_VAR)]
    pub steam_id: Option<String>,

    /// Where the SVG badge is written
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Download the game header image and inline it instead of linking to the store CDN
    #[arg(long, default_value_t = false)]
    pub embed_header: bool,

    /// Per-request timeout in seconds (1-60)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=60))]
    pub timeout: u64,

    /// Verbose mode
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    match run(&args) {
        Ok(path) => {
            tracing::info!("Badge written to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<PathBuf, Error> {
    // No request may go out without credentials.
    let config = Config::from_args(args)?;
    let client = SteamClient::new(config.timeout).map_err(Error::Client)?;

    let svg = pipeline::generate(&config, &client)?;
    write_badge(&config.output, &svg)?;

    Ok(config.output)
}

/// Writes through a temp file in the target directory so a failed run never
/// leaves a truncated badge behind.
fn write_badge(destination: &Path, svg: &str) -> io::Result<()> {
    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(svg.as_bytes())?;
    file.flush()?;
    file.persist(destination).map_err(io::Error::from)?;

    Ok(())
}
