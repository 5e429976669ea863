//! Conversion of a saved document to other formats via an external program.
//!
//! The engine only hands over the path of the serialized markdown; everything
//! the converter does is opaque, and its failures pass through as
//! [`ConvertError`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use which::which;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("converter `{0}` not found on PATH")]
    NotFound(String),

    #[error("converter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("converter I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders a markdown file into `format`, writing `output`.
pub trait DocumentConverter {
    fn name(&self) -> &str;

    fn convert(&self, source: &Path, format: &str, output: &Path) -> Result<(), ConvertError>;
}

/// Shells out to `pandoc` (or a compatible binary).
#[derive(Debug, Clone)]
pub struct PandocConverter {
    program: String,
    extra_args: Vec<String>,
}

impl Default for PandocConverter {
    fn default() -> Self {
        Self {
            program: "pandoc".to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl PandocConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Extra arguments appended after the generated ones (e.g. `--pdf-engine=...`).
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    fn resolve(&self) -> Result<PathBuf, ConvertError> {
        which(&self.program).map_err(|_| ConvertError::NotFound(self.program.clone()))
    }

    /// Command-line arguments for one conversion. PDF output is selected by
    /// the output extension since pandoc has no `pdf` writer name.
    pub fn arguments(&self, source: &Path, format: &str, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            source.as_os_str().to_owned(),
            "-o".into(),
            output.as_os_str().to_owned(),
        ];
        if !format.eq_ignore_ascii_case("pdf") {
            args.push("-t".into());
            args.push(format.into());
        }
        args.extend(self.extra_args.iter().map(OsString::from));
        args
    }
}

impl DocumentConverter for PandocConverter {
    fn name(&self) -> &str {
        &self.program
    }

    fn convert(&self, source: &Path, format: &str, output: &Path) -> Result<(), ConvertError> {
        let program = self.resolve()?;
        log::info!(
            "converting {} to {format} via {}",
            source.display(),
            program.display()
        );
        let result = Command::new(&program)
            .args(self.arguments(source, format, output))
            .output()?;
        if !result.status.success() {
            return Err(ConvertError::Failed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
