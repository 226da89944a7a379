use std::{fs::File, io, process::ExitCode, time::Duration};

use clap::Parser;
use engine::{
    BalanceQuery, BalanceType, Catalog, CallStatus, Engine, EngineError, FilterSelection, Lookup,
};
use migration::{Migrator, MigratorTrait};
use rest_client::Client;

use crate::{
    cli::{BalancesArgs, Cli, Command},
    error::{AppError, Result},
    output::NO_DATA,
    settings::{DEFAULT_LOG_LEVEL, Settings},
};

mod cli;
mod error;
mod output;
mod settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = settings::load(&cli.global);

    let level = settings
        .as_ref()
        .map_or(DEFAULT_LOG_LEVEL, |settings| settings.log_level.as_str());
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(format!(
            "glwalker={level},engine={level},rest_client={level}"
        ))
        .init();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, settings: Settings) -> Result<()> {
    let engine = build_engine(&settings).await?;

    if let Command::Refresh = command {
        let summary = engine.refresh_metadata().await?;
        println!(
            "Refreshed {} ledgers, {} periods, {} currencies and {} valuesets.",
            summary.ledgers,
            summary.periods,
            summary.currencies,
            summary.segment_values.len()
        );
        return Ok(());
    }

    if !engine.has_metadata().await? {
        tracing::info!("metadata store is empty, refreshing before the first query");
        engine.refresh_metadata().await?;
    }

    let result = match command {
        Command::Refresh => Ok(()),
        Command::Ledgers => list_ledgers(&engine).await,
        Command::Currencies => list_currencies(&engine).await,
        Command::Periods { ledger } => list_periods(&engine, ledger).await,
        Command::Values { segment } => list_values(&engine, &segment).await,
        Command::Balances(args) => balances(&engine, args).await,
    };

    // Store failures on read paths render as an empty result.
    match result {
        Err(AppError::Engine(EngineError::Database(err))) => {
            tracing::error!("metadata store query failed: {err}");
            println!("{NO_DATA}");
            Ok(())
        }
        other => other,
    }
}

async fn build_engine(settings: &Settings) -> Result<Engine<Client>> {
    let database = sea_orm::Database::connect(settings.database_url()).await?;
    Migrator::up(&database, None).await?;

    let client = Client::builder()
        .base_url(&settings.api.base_url)
        .credentials(&settings.api.username, &settings.api.password)
        .verify_ssl(settings.api.verify_ssl)
        .timeout(Duration::from_secs(settings.api.timeout_secs))
        .max_pages(settings.api.max_pages)
        .build()?;

    let engine = Engine::builder()
        .database(database)
        .client(client)
        .catalog(Catalog::load_or_empty(&settings.catalog))
        .failure_policy(settings.failure_policy)
        .build()
        .await?;
    Ok(engine)
}

async fn list_ledgers(engine: &Engine<Client>) -> Result<()> {
    let ledgers = engine.ledgers().await?;
    if ledgers.is_empty() {
        println!("{NO_DATA}");
        return Ok(());
    }
    output::write_rows(
        io::stdout().lock(),
        &["ledger_id", "name", "currency", "period_type"],
        ledgers.into_iter().map(|ledger| {
            vec![
                ledger.ledger_id.to_string(),
                ledger.name,
                ledger.currency_code,
                ledger.accounted_period_type,
            ]
        }),
    )
}

async fn list_currencies(engine: &Engine<Client>) -> Result<()> {
    let currencies = engine.currencies().await?;
    if currencies.is_empty() {
        println!("{NO_DATA}");
        return Ok(());
    }
    output::write_rows(
        io::stdout().lock(),
        &["code", "name"],
        currencies
            .into_iter()
            .map(|currency| vec![currency.code, currency.name]),
    )
}

async fn list_periods(engine: &Engine<Client>, ledger_id: i64) -> Result<()> {
    let periods = match engine.ledger_periods(ledger_id).await? {
        Lookup::Found(periods) if !periods.is_empty() => periods,
        Lookup::Found(_) => {
            println!("{NO_DATA}");
            return Ok(());
        }
        Lookup::Missing(miss) => {
            tracing::warn!("{miss}, run `glwalker refresh`");
            println!("{NO_DATA}");
            return Ok(());
        }
    };
    output::write_rows(
        io::stdout().lock(),
        &["period", "start_date", "end_date"],
        periods.into_iter().map(|period| {
            vec![
                period.name,
                period.start_date.to_string(),
                period.end_date.to_string(),
            ]
        }),
    )
}

async fn list_values(engine: &Engine<Client>, segment: &str) -> Result<()> {
    let values = engine.segment_values(segment).await?;
    if values.is_empty() {
        println!("{NO_DATA}");
        return Ok(());
    }
    output::write_rows(
        io::stdout().lock(),
        &["value", "description", "enabled"],
        values.into_iter().map(|value| {
            vec![
                value.value,
                value.description.unwrap_or_default(),
                if value.enabled { "Y" } else { "N" }.to_string(),
            ]
        }),
    )
}

async fn balances(engine: &Engine<Client>, args: BalancesArgs) -> Result<()> {
    let (ids, values): (Vec<String>, Vec<Option<Vec<String>>>) = args
        .filters
        .into_iter()
        .map(|(segment, values)| (segment, Some(values)))
        .unzip();
    let query = BalanceQuery {
        ledger_id: args.ledger,
        selection: FilterSelection::from_pairs(&ids, &values)?,
        period_to: args.to.unwrap_or_else(|| args.from.clone()),
        period_from: args.from,
        currency: args.currency.unwrap_or_default(),
        balance_type: BalanceType::parse(&args.balance_type, args.from_currency.as_deref())?,
        flex_mode: args.mode,
    };

    let report = engine.account_balances(&query).await?;

    for call in report.failures() {
        if let CallStatus::Failed(reason) = &call.status {
            eprintln!(
                "failed: period {}, combination {}: {reason}",
                call.period, call.combination
            );
        }
    }
    if let Some(miss) = &report.missing {
        tracing::warn!("{miss}, run `glwalker refresh`");
    }

    let Some(table) = &report.table else {
        println!("{NO_DATA}");
        return Ok(());
    };
    match &args.output {
        Some(path) => {
            output::write_table(File::create(path)?, table)?;
            tracing::info!(rows = table.len(), path = %path.display(), "balances written");
        }
        None => output::write_table(io::stdout().lock(), table)?,
    }
    Ok(())
}
