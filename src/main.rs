use std::path::PathBuf;

use clap::Parser;
use mkicns::{build_icon, BuildConfig, SystemRunner};
use tracing_subscriber::EnvFilter;

/// Build a macOS .icns icon from an SVG using rsvg-convert and iconutil
#[derive(Parser, Debug)]
#[command(name = "mkicns", version, about)]
struct Cli {
    /// Input SVG image
    #[arg(long)]
    source: Option<PathBuf>,

    /// Directory that receives the .icns file
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Base name for the iconset and icon file
    #[arg(long)]
    name: Option<String>,

    /// Rasterizer program
    #[arg(long)]
    rasterizer: Option<String>,

    /// Packager program
    #[arg(long)]
    packager: Option<String>,

    /// Print a JSON build report instead of progress messages
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> BuildConfig {
        let defaults = BuildConfig::default();
        BuildConfig {
            source: self.source.clone().unwrap_or(defaults.source),
            output_dir: self.output_dir.clone().unwrap_or(defaults.output_dir),
            name: self.name.clone().unwrap_or(defaults.name),
            rasterizer: self.rasterizer.clone().unwrap_or(defaults.rasterizer),
            packager: self.packager.clone().unwrap_or(defaults.packager),
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config();
    let quiet = cli.json;
    let report = build_icon(&config, &SystemRunner::new(), &mut |stage| {
        if !quiet {
            println!("{}", stage);
        }
    })?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        let code = err
            .downcast_ref::<mkicns::Error>()
            .map(mkicns::Error::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
