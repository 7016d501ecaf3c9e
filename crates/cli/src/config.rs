use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use sarcomere_activation::Protocol;
use serde::Deserialize;

use crate::Args;

const DEFAULT_OUTPUT: &str = "trajectory.csv";

/// Settings for one simulation run, read from TOML and overridden by flags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Directory holding the parameter set CSV files.
    pub params: Option<PathBuf>,
    /// Forcing CSV with `time,ca,sl` columns; the protocol is used if absent.
    pub input: Option<PathBuf>,
    /// Trajectory CSV to write.
    pub output: Option<PathBuf>,
    /// Integration step in seconds.
    pub step: Option<f64>,
    pub protocol: Protocol,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Applies command-line flags on top of the file settings.
    #[must_use]
    pub fn with_args(self, args: Args) -> Self {
        Self {
            params: args.params.or(self.params),
            input: args.input.or(self.input),
            output: args.output.or(self.output),
            step: args.step.or(self.step),
            protocol: self.protocol,
        }
    }

    pub fn params_dir(&self) -> Result<&Path> {
        self.params
            .as_deref()
            .context("no parameter directory: pass --params or set `params` in the config")
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}
