//! CSV input and output of forcing and trajectory records.

use std::{
    io::{Read, Write},
    path::Path,
};

use anyhow::{Context, Result};
use sarcomere_core::{Forcing, Trajectory};
use serde::Deserialize;

/// One row of a forcing CSV.
#[derive(Debug, Deserialize)]
struct ForcingRecord {
    #[serde(alias = "times")]
    time: f64,
    #[serde(alias = "Ca")]
    ca: f64,
    #[serde(alias = "SL")]
    sl: f64,
}

pub fn read_forcing(path: &Path) -> Result<Forcing> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open forcing {}", path.display()))?;
    parse_forcing(reader).with_context(|| format!("invalid forcing {}", path.display()))
}

fn parse_forcing<R: Read>(mut reader: csv::Reader<R>) -> Result<Forcing> {
    let (mut times, mut ca, mut sl) = (Vec::new(), Vec::new(), Vec::new());
    for record in reader.deserialize() {
        let record: ForcingRecord = record?;
        times.push(record.time);
        ca.push(record.ca);
        sl.push(record.sl);
    }
    Ok(Forcing::new(times, ca, sl)?)
}

pub fn write_trajectory(path: &Path, trajectory: &Trajectory) -> Result<()> {
    let writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_samples(writer, trajectory).with_context(|| format!("failed to write {}", path.display()))
}

fn write_samples<W: Write>(mut writer: csv::Writer<W>, trajectory: &Trajectory) -> Result<()> {
    for sample in trajectory.samples() {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    Ok(())
}
