//! Iconset staging: the size table and rasterization into a `.iconset` directory

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::tool::{Invocation, ToolRunner};

/// Pixel sizes rendered into the iconset, in generation order
pub const ICON_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

/// Largest size that also gets an `@2x` variant
pub const MAX_RETINA_SIZE: u32 = 512;

/// One PNG inside the iconset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconVariant {
    /// Nominal (point) size
    pub size: u32,
    /// 1 for the base image, 2 for the high-DPI `@2x` image
    pub scale: u32,
}

impl IconVariant {
    /// Actual pixel dimensions of the rendered image
    pub fn pixels(&self) -> u32 {
        self.size * self.scale
    }

    pub fn file_name(&self) -> String {
        if self.scale == 1 {
            format!("icon_{0}x{0}.png", self.size)
        } else {
            format!("icon_{0}x{0}@{1}x.png", self.size, self.scale)
        }
    }
}

/// Every variant to render: each size at 1x, plus 2x up to [`MAX_RETINA_SIZE`].
pub fn variants() -> Vec<IconVariant> {
    ICON_SIZES
        .iter()
        .flat_map(|&size| {
            let retina = (size <= MAX_RETINA_SIZE).then_some(IconVariant { size, scale: 2 });
            std::iter::once(IconVariant { size, scale: 1 }).chain(retina)
        })
        .collect()
}

/// Command line that renders `source` into `output` at `pixels` square
pub fn rasterize_invocation(rasterizer: &str, source: &Path, pixels: u32, output: &Path) -> Invocation {
    Invocation::new(rasterizer)
        .arg("-w")
        .arg(pixels.to_string())
        .arg("-h")
        .arg(pixels.to_string())
        .arg(source)
        .arg("-o")
        .arg(output)
}

/// Transient staging directory, removed when dropped
#[derive(Debug)]
pub struct StagingDir {
    path: PathBuf,
    armed: bool,
}

impl StagingDir {
    /// Create a fresh, empty directory at `path`, clearing leftovers from an
    /// earlier interrupted run.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            debug!("removing stale staging directory {}", path.display());
            fs::remove_dir_all(&path)
                .map_err(|e| Error::io(format!("failed to clear {}", path.display()), e))?;
        }
        fs::create_dir_all(&path)
            .map_err(|e| Error::io(format!("failed to create {}", path.display()), e))?;
        Ok(Self { path, armed: true })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory now, reporting any failure.
    pub fn remove(mut self) -> Result<()> {
        self.armed = false;
        fs::remove_dir_all(&self.path)
            .map_err(|e| Error::io(format!("failed to remove {}", self.path.display()), e))
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to remove staging directory {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Render every variant of `source` into `staging`, stopping at the first failure.
///
/// Returns the paths written, in generation order.
pub fn rasterize(
    runner: &dyn ToolRunner,
    rasterizer: &str,
    source: &Path,
    staging: &StagingDir,
) -> Result<Vec<PathBuf>> {
    let variants = variants();
    info!("rasterizing {} images into {}", variants.len(), staging.path().display());

    let mut written = Vec::with_capacity(variants.len());
    for variant in variants {
        let output = staging.path().join(variant.file_name());
        runner.run(&rasterize_invocation(rasterizer, source, variant.pixels(), &output))?;
        written.push(output);
    }
    Ok(written)
}
