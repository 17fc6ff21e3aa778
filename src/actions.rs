//! Hand-off of values to later workflow steps
//!
//! GitHub Actions picks up `NAME=value` lines appended to the files named by
//! `GITHUB_ENV` (environment variables for later steps) and `GITHUB_OUTPUT`
//! (step outputs). Outside a runner the values are only logged.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowEnv {
    env_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

impl WorkflowEnv {
    pub fn from_env() -> Self {
        Self::new(
            std::env::var_os("GITHUB_ENV").map(PathBuf::from),
            std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
        )
    }

    pub fn new(env_file: Option<PathBuf>, output_file: Option<PathBuf>) -> Self {
        Self {
            env_file,
            output_file,
        }
    }

    /// Makes `name` available as an environment variable to later steps.
    pub fn export_variable(&self, name: &str, value: &str) -> io::Result<()> {
        info!("Exporting {}={}", name, value);
        match &self.env_file {
            Some(path) => append_command(path, name, value),
            None => Ok(()),
        }
    }

    /// Sets a step output.
    pub fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
        info!("Output {}={}", name, value);
        match &self.output_file {
            Some(path) => append_command(path, name, value),
            None => Ok(()),
        }
    }
}

fn append_command(path: &Path, name: &str, value: &str) -> io::Result<()> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    let command = format_command(name, value, &delimiter)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(command.as_bytes())
}

/// Multiline values go in a heredoc block closed by `delimiter`, which must
/// not occur in either the name or the value.
fn format_command(name: &str, value: &str, delimiter: &str) -> io::Result<String> {
    if !value.contains('\n') {
        return Ok(format!("{name}={value}\n"));
    }

    if name.contains(delimiter) || value.contains(delimiter) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("value of {name} contains the delimiter {delimiter}"),
        ));
    }

    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}
