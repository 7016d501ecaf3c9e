//! Runs the sarcomere activation surrogate on a forcing protocol or CSV input
//! and writes the permissivity trajectory as CSV.

mod config;
mod records;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use sarcomere_activation::{AnnModel, LatentState};
use sarcomere_solvers::transient::euler::{Action, Event, Status};

use crate::config::RunConfig;

/// Grid points between progress messages.
const PROGRESS_INTERVAL: usize = 100;

/// Simulate sarcomere permissivity with the learned surrogate.
#[derive(Debug, Parser)]
#[command(name = "sarcomere", version, about)]
pub struct Args {
    /// Directory holding the parameter set CSV files.
    #[arg(long, value_name = "DIR")]
    params: Option<PathBuf>,

    /// TOML run configuration.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Forcing CSV with `time,ca,sl` columns. Defaults to the configured protocol.
    #[arg(long, value_name = "CSV")]
    input: Option<PathBuf>,

    /// Trajectory CSV to write [default: trajectory.csv].
    #[arg(long, value_name = "CSV")]
    output: Option<PathBuf>,

    /// Integration step in seconds.
    #[arg(long, value_name = "SECONDS")]
    step: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    run(&config.with_args(args))
}

fn run(config: &RunConfig) -> Result<()> {
    let mut model = AnnModel::from_dir(config.params_dir()?)
        .context("failed to load parameter set")?;
    if let Some(dt) = config.step {
        model = model.with_step(dt);
    }

    let forcing = match &config.input {
        Some(path) => records::read_forcing(path)?,
        None => config
            .protocol
            .generate()
            .context("invalid forcing protocol")?,
    };
    if let Some((start, end)) = forcing.span() {
        info!("Forcing: {} samples from {start} s to {end} s", forcing.len());
    }

    let progress = |event: &Event<'_, LatentState>| -> Option<Action> {
        if event.step % PROGRESS_INTERVAL == 0 {
            debug!("step {}: P = {:.5}", event.step, event.state.permissivity());
        }
        None
    };
    let run = model
        .solve_observed(&forcing, progress)
        .context("simulation failed")?;
    if run.status != Status::Complete {
        warn!("Simulation stopped before the end of the forcing");
    }

    let trajectory = run.trajectory;
    let output = config.output_path();
    records::write_trajectory(&output, &trajectory)?;
    info!("Wrote {} samples to {}", trajectory.len(), output.display());

    if let Some(peak) = trajectory.p.iter().copied().reduce(f64::max) {
        info!("Peak permissivity: {peak:.4}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{env, fs, path::Path};

    use approx::assert_relative_eq;

    fn unit_params() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../integration-tests/fixtures/unit")
    }

    fn scratch(name: &str) -> PathBuf {
        env::temp_dir().join(format!("sarcomere-{}-{name}", std::process::id()))
    }

    #[test]
    fn run_writes_trajectory_from_forcing_csv() {
        let input = scratch("forcing.csv");
        let output = scratch("trajectory.csv");
        fs::write(&input, "time,ca,sl\n0,1,0\n0.1,1,0\n0.2,1,0\n0.3,1,0\n").unwrap();

        let config = RunConfig {
            params: Some(unit_params()),
            input: Some(input.clone()),
            output: Some(output.clone()),
            step: Some(0.1),
            ..RunConfig::default()
        };
        run(&config).unwrap();

        let mut reader = csv::Reader::from_path(&output).unwrap();
        let p: Vec<f64> = reader
            .records()
            .map(|record| record.unwrap()[3].parse().unwrap())
            .collect();
        fs::remove_file(&input).ok();
        fs::remove_file(&output).ok();

        assert_eq!(p.len(), 3);
        assert_eq!(p[0], 0.2);
        assert_relative_eq!(p[1], 0.268_243_347_943_643_9, epsilon = 1e-12);
        assert_relative_eq!(p[2], 0.337_523_385_055_838_07, epsilon = 1e-12);
    }

    #[test]
    fn run_uses_protocol_without_input() {
        let output = scratch("protocol.csv");
        let config = RunConfig::parse("protocol = { duration = 0.05 }")
            .unwrap()
            .with_args(Args {
                params: Some(unit_params()),
                config: None,
                input: None,
                output: Some(output.clone()),
                step: None,
            });

        run(&config).unwrap();

        let rows = csv::Reader::from_path(&output).unwrap().records().count();
        fs::remove_file(&output).ok();

        // Protocol samples end at 0.0499 s, one step short of 50 ms.
        assert_eq!(rows, 49);
    }

    #[test]
    fn run_requires_parameter_directory() {
        let err = run(&RunConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no parameter directory"));
    }
}
