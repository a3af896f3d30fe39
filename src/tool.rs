//! External program invocation
//!
//! Every call out to `rsvg-convert` or `iconutil` goes through the
//! [`ToolRunner`] trait. [`SystemRunner`] is the real implementation backed
//! by `std::process::Command`; tests substitute their own runner.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// A single command line: program plus arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for a in &self.args {
            write!(f, " {}", a.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external programs on behalf of the build step
pub trait ToolRunner {
    /// Check that the program can be launched at all.
    ///
    /// Only a failure to spawn counts; the probe's own exit status is
    /// ignored, so tools that reject `--version` still pass.
    fn probe(&self, invocation: &Invocation) -> Result<()>;

    /// Run the program to completion, failing on a non-zero exit.
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// [`ToolRunner`] that spawns real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }

    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        cmd
    }
}

impl ToolRunner for SystemRunner {
    fn probe(&self, invocation: &Invocation) -> Result<()> {
        debug!("probing: {}", invocation);
        Self::command(invocation)
            .stdin(Stdio::null())
            .output()
            .map(|_| ())
            .map_err(|e| spawn_error(invocation, e))
    }

    fn run(&self, invocation: &Invocation) -> Result<()> {
        debug!("running: {}", invocation);
        let status = Self::command(invocation)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| spawn_error(invocation, e))?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::ToolFailed { command: invocation.to_string(), code: status.code() })
        }
    }
}

fn spawn_error(invocation: &Invocation, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::ToolMissing {
            program: invocation.program.clone(),
            hint: install_hint(&invocation.program),
        }
    } else {
        Error::io(format!("failed to launch `{}`", invocation.program), err)
    }
}

/// Remediation text shown when `program` is not installed
pub fn install_hint(program: &str) -> String {
    let name = std::path::Path::new(program)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string());
    match name.as_str() {
        "rsvg-convert" => "Please install librsvg using Homebrew: brew install librsvg".to_string(),
        "iconutil" => "iconutil ships with the Xcode command line tools: xcode-select --install".to_string(),
        _ => format!("Make sure `{}` is installed and on your PATH", program),
    }
}
