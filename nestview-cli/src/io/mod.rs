use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{LevelFilter, info};
use serde::Serialize;
use serde::de::DeserializeOwned;
use svg::Document;

use crate::EPOCH;

pub mod cli;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("could not open file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("could not parse file: {}", path.display()))
}

pub fn write_json(value: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not open file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)
        .with_context(|| format!("could not write file: {}", path.display()))?;

    info!("json written to {:?}", fs::canonicalize(path)?);
    Ok(())
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document)
        .with_context(|| format!("could not write svg file: {}", path.display()))?;
    info!("svg written to {:?}", fs::canonicalize(path)?);
    Ok(())
}

/// Elapsed time as `hh:mm:ss`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

/// Logs to stdout with the elapsed time since [`EPOCH`] and the thread name in front of every line.
/// The HTTP stack is capped at `warn` unless a stricter level is requested.
pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    let http_filter = level_filter.min(LevelFilter::Warn);
    fern::Dispatch::new()
        .format(|out, message, record| {
            let thread = std::thread::current();
            out.finish(format_args!(
                "[{:<5}] [{}] <{}> {message}",
                record.level(),
                format_elapsed(EPOCH.elapsed()),
                thread.name().unwrap_or("-"),
            ))
        })
        .level(level_filter)
        .level_for("hyper_util", http_filter)
        .level_for("reqwest", http_filter)
        .chain(std::io::stdout())
        .apply()
        .context("could not initialize logger")?;
    info!("started at {}", jiff::Timestamp::now());
    Ok(())
}
