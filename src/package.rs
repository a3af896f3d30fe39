//! Packaging a staged iconset into a compiled `.icns` file

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::iconset::StagingDir;
use crate::tool::{Invocation, ToolRunner};

/// Command line that compiles `iconset` into `output`
pub fn package_invocation(packager: &str, iconset: &Path, output: &Path) -> Invocation {
    Invocation::new(packager)
        .arg("-c")
        .arg("icns")
        .arg(iconset)
        .arg("-o")
        .arg(output)
}

/// Run the packager on `staging`, then remove the staging directory.
///
/// The directory is removed whether or not the packager succeeds; a
/// packager failure takes precedence over a cleanup failure.
pub fn package(runner: &dyn ToolRunner, packager: &str, staging: StagingDir, output: &Path) -> Result<()> {
    info!("packaging {} into {}", staging.path().display(), output.display());
    let packaged = runner.run(&package_invocation(packager, staging.path(), output));
    let cleaned = staging.remove();
    packaged?;
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_invocation_matches_iconutil_syntax() {
        let inv = package_invocation("iconutil", Path::new("R/App.iconset"), Path::new("R/App.icns"));
        assert_eq!(inv.to_string(), "iconutil -c icns R/App.iconset -o R/App.icns");
    }
}
