mod bbox;
mod compare;
mod config;
mod driver;
mod fetch;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::bbox::BoundingBox;
use crate::fetch::FetchOptions;

#[derive(Parser)]
#[command(
    name = "mapfetch",
    about = "Fetch the same OSM map bbox from two API servers and save each response"
)]
struct Cli {
    /// Bounding box: a preset (hh, wolvercote) or minLon,minLat,maxLon,maxLat
    #[arg(long, default_value = "hh", allow_hyphen_values = true)]
    bbox: BoundingBox,

    /// Directory to write file1.xml and file2.xml into
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Fail instead of saving non-2xx responses
    #[arg(long)]
    check_status: bool,

    /// Request timeout in seconds (none by default)
    #[arg(long)]
    timeout: Option<u64>,

    /// Report whether the two saved responses are byte-identical
    #[arg(long)]
    compare: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(log_level(verbose).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    cli.bbox.validate().context("Invalid bounding box")?;
    debug!(bbox = %cli.bbox, "Using bounding box");

    let client = fetch::build_client(cli.timeout.map(Duration::from_secs))
        .context("Failed to build HTTP client")?;
    let requests = driver::plan_requests(&config::ENDPOINTS, &cli.bbox, &cli.output_dir);
    let options = FetchOptions {
        check_status: cli.check_status,
    };

    let mut stdout = io::stdout();
    driver::run(&client, &requests, options, &mut stdout).await?;

    if cli.compare {
        let comparison = compare::compare_files(&requests[0].destination, &requests[1].destination)
            .context("Failed to compare saved responses")?;
        writeln!(stdout, "{comparison}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HH_BBOX, WOLVERCOTE_BBOX};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn no_arguments_reproduces_the_fixed_run() {
        let cli = Cli::try_parse_from(["mapfetch"]).unwrap();

        assert_eq!(cli.bbox, HH_BBOX);
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(!cli.check_status);
        assert_eq!(cli.timeout, None);
        assert!(!cli.compare);
        assert_eq!(log_level(cli.verbose), LevelFilter::WARN);
    }

    #[test]
    fn accepts_negative_coordinates_and_presets() {
        let cli = Cli::try_parse_from(["mapfetch", "--bbox", "-1.5,51.5,-1.0,52.0"]).unwrap();
        assert_eq!(cli.bbox, BoundingBox::new(-1.5, 51.5, -1.0, 52.0));

        let cli = Cli::try_parse_from(["mapfetch", "--bbox", "wolvercote", "-vv", "--compare"]).unwrap();
        assert_eq!(cli.bbox, WOLVERCOTE_BBOX);
        assert!(cli.compare);
        assert_eq!(log_level(cli.verbose), LevelFilter::DEBUG);
    }

    #[rstest]
    #[case("1,1,0,0")]
    #[case("1,2,3")]
    fn rejects_invalid_bbox_arguments(#[case] bbox: &str) {
        assert!(Cli::try_parse_from(["mapfetch", "--bbox", bbox]).is_err());
    }
}
