//! Command implementations for the CBC parser CLI
//!
//! This module wires argument parsing, configuration layering, decoding and
//! JSON output together. Logs go to stderr so stdout only carries JSON.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::app::models::{Device, NormalRangeTable};
use crate::app::services::cbc_decoder::{CbcDecoder, EdanDecoder, HumanDecoder};
use crate::app::services::json_writer::WriteJson;
use crate::cli::args::{Args, DecodeArgs};
use crate::config::Config;
use crate::constants::LOG_TARGET;

/// Outcome of a decode run
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeSummary {
    /// Analyzer the export came from
    pub device: Device,
    /// Number of records written
    pub records_written: usize,
    /// Wall clock time of the run
    pub elapsed: Duration,
}

/// Main command runner
pub fn run(args: Args) -> Result<Option<DecodeSummary>> {
    let Some(command) = args.command else {
        return Ok(None);
    };

    let decode_args = command.args();
    setup_logging(decode_args)?;
    debug!("Command line arguments: {:?}", decode_args);

    let config = load_configuration(command.device(), decode_args)?;
    debug!("Loaded configuration: {:?}", config);

    let stdout = std::io::stdout();
    let summary = decode_to_writer(&config, stdout.lock())?;

    info!(
        "Decoded {} {} record(s) in {:.2?}",
        summary.records_written, summary.device, summary.elapsed
    );

    Ok(Some(summary))
}

/// Set up logging based on verbosity settings
pub fn setup_logging(args: &DecodeArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

/// Load configuration: defaults, then environment, then command line
pub fn load_configuration(device: Device, args: &DecodeArgs) -> Result<Config> {
    let config = Config::load_layered(
        device,
        args.input.clone(),
        args.normal_ranges.clone(),
        args.format,
        args.multi,
    )
    .context("Invalid configuration")?;

    Ok(config)
}

/// Decode the configured export and write its JSON to `out`
///
/// The JSON is followed by a single newline.
pub fn decode_to_writer<W: Write>(config: &Config, out: W) -> Result<DecodeSummary> {
    let start_time = Instant::now();

    let normal_ranges = match &config.normal_ranges_path {
        Some(path) => Some(NormalRangeTable::from_path(path).with_context(|| {
            format!("Failed to load normal ranges from {}", path.display())
        })?),
        None => {
            debug!("No normal range document configured");
            None
        }
    };

    let records_written = match config.device {
        Device::Edan => decode_with(&EdanDecoder::new(), config, normal_ranges.as_ref(), out)?,
        Device::Human => decode_with(&HumanDecoder::new(), config, normal_ranges.as_ref(), out)?,
    };

    Ok(DecodeSummary {
        device: config.device,
        records_written,
        elapsed: start_time.elapsed(),
    })
}

fn decode_with<D, W>(
    decoder: &D,
    config: &Config,
    normal_ranges: Option<&NormalRangeTable>,
    mut out: W,
) -> Result<usize>
where
    D: CbcDecoder,
    D::Record: WriteJson,
    W: Write,
{
    let path = &config.input_path;
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    let source = BufReader::new(file);

    let records_written = if config.multi_record {
        let records = decoder
            .decode_many(source, normal_ranges)
            .with_context(|| format!("Failed to decode {} export {}", config.device, path.display()))?;
        records
            .write_json(&mut out, config.output_format)
            .context("Failed to write JSON output")?;
        records.len()
    } else {
        let record = decoder
            .decode_one(source, normal_ranges)
            .with_context(|| format!("Failed to decode {} export {}", config.device, path.display()))?;
        record
            .write_json(&mut out, config.output_format)
            .context("Failed to write JSON output")?;
        1
    };

    writeln!(out).context("Failed to write JSON output")?;
    out.flush().context("Failed to flush JSON output")?;

    Ok(records_written)
}
