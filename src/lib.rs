//! mkicns
//!
//! Builds a macOS application icon (`.icns`) from a single SVG by driving two
//! external tools: `rsvg-convert` renders the SVG at every size the iconset
//! needs, and `iconutil` compiles the resulting `.iconset` directory.
//!
//! The run is strictly sequential:
//!
//! 1. check the rasterizer can be launched
//! 2. render 13 PNGs into `<output_dir>/<name>.iconset`
//! 3. compile the iconset into `<output_dir>/<name>.icns`
//! 4. remove the iconset
//!
//! Any tool failure aborts the run, and the staging directory never outlives
//! it.
//!
//! # Example
//!
//! ```no_run
//! use mkicns::{build_icon, BuildConfig, SystemRunner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BuildConfig {
//!     source: "assets/logo.svg".into(),
//!     output_dir: "assets".into(),
//!     name: "MyApp".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = build_icon(&config, &SystemRunner::new(), &mut |stage| println!("{}", stage))?;
//! println!("wrote {}", report.output.display());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

pub mod error;
pub use error::{Error, Result};

pub mod iconset;
pub mod package;
pub mod tool;

pub use iconset::{IconVariant, StagingDir, ICON_SIZES};
pub use tool::{Invocation, SystemRunner, ToolRunner};

/// Configuration for one icon build
///
/// The defaults are the fixed locations of the Renamr project, relative to
/// the repository root:
///
/// ```
/// let cfg = mkicns::BuildConfig::default();
/// assert_eq!(cfg.output_file(), std::path::Path::new("Renamr/Resources/Renamr.icns"));
/// ```
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Input vector image
    pub source: PathBuf,
    /// Directory receiving the `.icns` (created if missing)
    pub output_dir: PathBuf,
    /// Base name of the iconset and icon file
    pub name: String,
    /// Rasterizer program (name on PATH or full path)
    pub rasterizer: String,
    /// Packager program (name on PATH or full path)
    pub packager: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("Renamr/renamr_icon.svg"),
            output_dir: PathBuf::from("Renamr/Resources"),
            name: "Renamr".to_string(),
            rasterizer: "rsvg-convert".to_string(),
            packager: "iconutil".to_string(),
        }
    }
}

impl BuildConfig {
    /// Where the intermediate PNGs are staged
    pub fn staging_dir(&self) -> PathBuf {
        self.output_dir.join(format!("{}.iconset", self.name))
    }

    /// Where the compiled icon is written
    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(format!("{}.icns", self.name))
    }
}

/// Outcome of a successful build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// The compiled icon file
    pub output: PathBuf,
    /// Every PNG rendered into the (now removed) iconset
    pub images: Vec<PathBuf>,
}

/// Progress notifications emitted while building
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage<'a> {
    CreatingIconset,
    CreatingIcns,
    Finished(&'a Path),
}

impl fmt::Display for Stage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::CreatingIconset => write!(f, "Creating iconset..."),
            Stage::CreatingIcns => write!(f, "Creating ICNS file..."),
            Stage::Finished(path) => write!(f, "ICNS file created successfully at: {}", path.display()),
        }
    }
}

/// Run the full build: probe, rasterize, package, clean up.
///
/// Fails with [`Error::ToolMissing`] before touching the filesystem if the
/// rasterizer cannot be launched, and with [`Error::ToolFailed`] as soon as
/// any tool exits non-zero. The staging directory is removed on every path.
pub fn build_icon(
    config: &BuildConfig,
    runner: &dyn ToolRunner,
    progress: &mut dyn FnMut(Stage<'_>),
) -> Result<BuildReport> {
    runner.probe(&Invocation::new(&config.rasterizer).arg("--version"))?;

    if !config.source.is_file() {
        return Err(Error::SourceMissing(config.source.clone()));
    }

    fs::create_dir_all(&config.output_dir)
        .map_err(|e| Error::io(format!("failed to create {}", config.output_dir.display()), e))?;

    progress(Stage::CreatingIconset);
    let staging = StagingDir::create(config.staging_dir())?;
    let images = iconset::rasterize(runner, &config.rasterizer, &config.source, &staging)?;

    progress(Stage::CreatingIcns);
    let output = config.output_file();
    package::package(runner, &config.packager, staging, &output)?;

    info!("built {} from {} images", output.display(), images.len());
    progress(Stage::Finished(&output));
    Ok(BuildReport { output, images })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert_eq!(config.rasterizer, "rsvg-convert");
        assert_eq!(config.packager, "iconutil");
        assert_eq!(config.staging_dir(), Path::new("Renamr/Resources/Renamr.iconset"));
    }

    #[test]
    fn test_derived_paths_follow_name() {
        let config = BuildConfig {
            output_dir: PathBuf::from("out"),
            name: "Demo".to_string(),
            ..Default::default()
        };
        assert_eq!(config.staging_dir(), Path::new("out/Demo.iconset"));
        assert_eq!(config.output_file(), Path::new("out/Demo.icns"));
    }

    #[test]
    fn test_stage_messages() {
        assert_eq!(Stage::CreatingIconset.to_string(), "Creating iconset...");
        assert_eq!(Stage::CreatingIcns.to_string(), "Creating ICNS file...");
        assert_eq!(
            Stage::Finished(Path::new("R/App.icns")).to_string(),
            "ICNS file created successfully at: R/App.icns"
        );
    }
}
