use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use engine::{FailurePolicy, FlexMode};

#[derive(Debug, Parser)]
#[command(name = "glwalker")]
#[command(about = "Walk general-ledger balances of a remote accounting API")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides applied on top of the config file and the environment.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the API base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override the API username (password is never read from CLI).
    #[arg(long, global = true)]
    pub username: Option<String>,
    /// Accept invalid TLS certificates.
    #[arg(long, global = true)]
    pub insecure: bool,
    /// Override the metadata store path.
    #[arg(long, global = true)]
    pub database: Option<String>,
    /// Override the ledger definition file path.
    #[arg(long, global = true)]
    pub catalog: Option<String>,
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// `fail-fast` or `continue`.
    #[arg(long, global = true)]
    pub failure_policy: Option<FailurePolicy>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reload ledgers, periods, currencies and valuesets from the API.
    Refresh,
    /// List the cached ledgers of the ledger definition file.
    Ledgers,
    /// List the cached currencies.
    Currencies,
    /// List the periods of a ledger, newest first.
    Periods {
        #[arg(long)]
        ledger: i64,
    },
    /// List the cached values of a segment's valueset.
    Values {
        #[arg(long)]
        segment: String,
    },
    /// Fetch account balances and write them as CSV.
    Balances(BalancesArgs),
}

#[derive(Debug, Args)]
pub struct BalancesArgs {
    #[arg(long)]
    pub ledger: i64,
    /// First period of the range.
    #[arg(long)]
    pub from: String,
    /// Last period of the range, defaults to `--from`.
    #[arg(long)]
    pub to: Option<String>,
    /// Defaults to the ledger's currency.
    #[arg(long)]
    pub currency: Option<String>,
    /// `Total`, `Entered` or `From`.
    #[arg(long, default_value = "Total")]
    pub balance_type: String,
    /// Source currency of a `From` balance type.
    #[arg(long)]
    pub from_currency: Option<String>,
    /// `Detail` or `Summary`.
    #[arg(long, default_value = "Detail")]
    pub mode: FlexMode,
    /// Segment selection, e.g. `--filter COMPANY=101,102`. Repeatable.
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, Vec<String>)>,
    /// Write the CSV here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Parse `SEGMENT=v1,v2`. An empty value list leaves the segment unconstrained.
pub fn parse_filter(raw: &str) -> Result<(String, Vec<String>), String> {
    let (segment, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SEGMENT=value[,value...], got `{raw}`"))?;
    let segment = segment.trim();
    if segment.is_empty() {
        return Err(format!("missing segment name in `{raw}`"));
    }
    let values = values
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .collect();
    Ok((segment.to_string(), values))
}
