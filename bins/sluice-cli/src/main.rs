//! sluice: command-line front end for the Sluice pricing core.
//!
//! Quotes orders at a given block and timestamp, produces cosignatures,
//! and converts between the packed and JSON forms of curves and legacy
//! cosigner extra-data. Results are printed to stdout as JSON; logs go to
//! stderr.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use alloy_primitives::{Address, B256, I256, U256};
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use sluice_core::order::Order;
use sluice_core::types::{CosignedOverrides, CosignerData, DecayCurve, ExecutionSnapshot, PackedPositions};
use sluice_cosign::{Cosigner, EcdsaRecovery, extra_data};
use sluice_resolver::{LogFormat, Quoter, Resolver, ResolverConfig};

/// Sluice order pricing tool.
#[derive(Parser, Debug)]
#[command(name = "sluice", version, about = "Price and cosign Dutch-auction orders")]
struct Cli {
    /// Config file (default: <config dir>/sluice/sluice.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format ("text" or "json")
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Chain id cosignatures are bound to
    #[arg(long, global = true)]
    chain_id: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve an order to concrete amounts.
    Quote(QuoteArgs),
    /// Sign cosigner overrides for an order.
    Cosign(CosignArgs),
    /// Print an order's EIP-712 hash.
    Hash {
        /// Order JSON file
        order: PathBuf,
    },
    /// Decay curve helpers.
    Curve {
        #[command(subcommand)]
        action: CurveAction,
    },
    /// Legacy cosigner extra-data helpers.
    ExtraData {
        #[command(subcommand)]
        action: ExtraDataAction,
    },
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// Order JSON file
    order: PathBuf,

    /// Cosigned overrides JSON file
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Block number to price at
    #[arg(long, default_value_t = 0)]
    block: u64,

    /// Timestamp to price at
    #[arg(long, default_value_t = 0)]
    timestamp: u64,

    /// Priority fee per gas in wei
    #[arg(long, default_value = "0")]
    priority_fee: U256,

    /// Address of the filler
    #[arg(long, default_value_t = Address::ZERO)]
    filler: Address,

    /// Order hashes already filled (comma-separated)
    #[arg(long, value_delimiter = ',')]
    filled: Vec<B256>,

    /// Skip the deadline check
    #[arg(long)]
    ignore_deadline: bool,
}

#[derive(Args, Debug)]
struct CosignArgs {
    /// Order JSON file
    order: PathBuf,

    /// Cosigner data JSON file
    payload: PathBuf,

    /// Cosigner private key, hex
    #[arg(long)]
    key: String,
}

#[derive(Subcommand, Debug)]
enum CurveAction {
    /// Build a curve from `position:delta` points.
    Pack {
        /// Points, e.g. `10:-500 20:1000`
        #[arg(required = true)]
        points: Vec<String>,
    },
    /// Unpack the first `len` positions of a packed word.
    Unpack {
        /// Packed positions (decimal or 0x-hex)
        packed: U256,
        #[arg(long, default_value_t = 16)]
        len: usize,
    },
}

#[derive(Subcommand, Debug)]
enum ExtraDataAction {
    /// Encode a cosigner data JSON file to hex.
    Encode { payload: PathBuf },
    /// Decode hex extra-data to JSON.
    Decode { hex: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ResolverConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = parse_log_format(&format)?;
    }
    if let Some(chain_id) = cli.chain_id {
        config.chain_id = chain_id;
    }

    init_logging(&config.log_level, config.log_format);
    debug!(?config, "loaded config");

    match cli.command {
        Commands::Quote(args) => quote(config, args),
        Commands::Cosign(args) => cosign(&config, args),
        Commands::Hash { order } => {
            let order: Order = read_json(&order)?;
            println!("{}", order.order_hash());
            Ok(())
        }
        Commands::Curve { action } => curve(action),
        Commands::ExtraData { action } => extra(action),
    }
}

fn quote(mut config: ResolverConfig, args: QuoteArgs) -> Result<()> {
    if args.ignore_deadline {
        config.enforce_deadline = false;
    }
    let order: Order = read_json(&args.order)?;
    let overrides: Option<CosignedOverrides> = args
        .overrides
        .as_deref()
        .map(read_json::<CosignedOverrides>)
        .transpose()?;

    let snapshot = ExecutionSnapshot {
        block_number: U256::from(args.block),
        timestamp: U256::from(args.timestamp),
        priority_fee: args.priority_fee,
        chain_id: config.chain_id,
    };
    let ledger: HashSet<B256> = args.filled.into_iter().collect();
    let quoter = Quoter::new(Resolver::new(EcdsaRecovery, config), ledger);

    let resolved = quoter
        .quote(&order, overrides.as_ref(), &snapshot, args.filler)
        .context("Failed to resolve order")?;
    info!(order_hash = %resolved.order_hash, kind = order.kind(), "quoted");
    print_json(&resolved)
}

fn cosign(config: &ResolverConfig, args: CosignArgs) -> Result<()> {
    let cosigner = Cosigner::from_hex(&args.key).context("Invalid cosigner key")?;
    let order: Order = read_json(&args.order)?;
    let data: CosignerData = read_json(&args.payload)?;

    match order.cosigner() {
        Some(expected) if expected != cosigner.address() => {
            bail!("Order names cosigner {expected}, key belongs to {}", cosigner.address())
        }
        Some(_) => {}
        None => bail!("Order has no cosigner"),
    }

    let overrides = cosigner
        .cosign(order.order_hash(), config.chain_id, data)
        .context("Failed to sign overrides")?;
    info!(cosigner = %overrides.cosigner, chain_id = config.chain_id, "cosigned");
    print_json(&overrides)
}

fn curve(action: CurveAction) -> Result<()> {
    match action {
        CurveAction::Pack { points } => {
            let points = points
                .iter()
                .map(|p| parse_point(p))
                .collect::<Result<Vec<_>>>()?;
            let curve = DecayCurve::from_points(&points).context("Invalid curve")?;
            print_json(&curve)
        }
        CurveAction::Unpack { packed, len } => {
            if len > sluice_core::constants::MAX_CURVE_POINTS {
                bail!("At most {} positions fit in one word", sluice_core::constants::MAX_CURVE_POINTS);
            }
            print_json(&PackedPositions(packed).unpack(len))
        }
    }
}

fn extra(action: ExtraDataAction) -> Result<()> {
    match action {
        ExtraDataAction::Encode { payload } => {
            let data: CosignerData = read_json(&payload)?;
            let bytes = extra_data::encode(&data).context("Failed to encode extra data")?;
            println!("0x{}", hex::encode(bytes));
            Ok(())
        }
        ExtraDataAction::Decode { hex: input } => {
            let bytes = hex::decode(input.trim().trim_start_matches("0x")).context("Invalid hex")?;
            let data = extra_data::decode(&bytes).context("Failed to decode extra data")?;
            print_json(&data)
        }
    }
}

/// Parse `position:delta`.
fn parse_point(s: &str) -> Result<(u16, I256)> {
    let (position, delta) = s
        .split_once(':')
        .with_context(|| format!("Expected position:delta, got {s:?}"))?;
    let position = position
        .trim()
        .parse::<u16>()
        .with_context(|| format!("Invalid position in {s:?}"))?;
    let delta = delta
        .trim()
        .parse::<I256>()
        .map_err(|e| anyhow::anyhow!("Invalid delta in {s:?}: {e}"))?;
    Ok((position, delta))
}

fn parse_log_format(s: &str) -> Result<LogFormat> {
    match s {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => bail!("Unknown log format {other:?} (expected \"text\" or \"json\")"),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{out}");
    Ok(())
}

/// Initialize tracing on stderr with the given level and output format.
///
/// `RUST_LOG` takes precedence over `level` when set.
fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("10:-500").unwrap(), (10, I256::try_from(-500).unwrap()));
        assert_eq!(parse_point(" 3 : 7 ").unwrap(), (3, I256::try_from(7).unwrap()));
        assert!(parse_point("10").is_err());
        assert!(parse_point("70000:1").is_err());
        assert!(parse_point("1:abc").is_err());
    }

    #[test]
    fn parses_log_formats() {
        assert_eq!(parse_log_format("json").unwrap(), LogFormat::Json);
        assert_eq!(parse_log_format("text").unwrap(), LogFormat::Text);
        assert!(parse_log_format("xml").is_err());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["sluice", "hash", "order.json", "--chain-id", "10"]).unwrap();
        assert_eq!(cli.chain_id, Some(10));
        assert!(matches!(cli.command, Commands::Hash { .. }));
    }

    #[test]
    fn quote_flags_parse() {
        let cli = Cli::try_parse_from([
            "sluice",
            "quote",
            "order.json",
            "--block",
            "120",
            "--priority-fee",
            "0x10",
            "--filler",
            "0x1111111111111111111111111111111111111111",
        ])
        .unwrap();
        let Commands::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(args.block, 120);
        assert_eq!(args.priority_fee, U256::from(16));
        assert_eq!(args.filler, Address::repeat_byte(0x11));
        assert!(args.filled.is_empty());
    }

    #[test]
    fn read_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.json");
        fs::write(&path, "{not json").unwrap();
        let err = read_json::<Order>(&path).unwrap_err();
        assert!(format!("{err:#}").contains("order.json"));
    }
}
