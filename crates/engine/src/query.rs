//! Inputs and outputs of a balance aggregation.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{EngineError, FilterSelection, LookupMiss, ResultEngine, ResultTable};

/// Which balances to return, sent as the finder's `currencyType`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BalanceType {
    Total,
    Entered,
    /// Balances converted from `currency`.
    From { currency: String },
}

impl BalanceType {
    /// `from_currency` is only read for `From`, where it is required.
    pub fn parse(kind: &str, from_currency: Option<&str>) -> ResultEngine<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "total" => Ok(BalanceType::Total),
            "entered" => Ok(BalanceType::Entered),
            "from" => {
                let currency = from_currency
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| {
                        EngineError::InvalidInput(
                            "balance type From requires a from-currency".to_string(),
                        )
                    })?;
                Ok(BalanceType::From {
                    currency: currency.to_string(),
                })
            }
            other => Err(EngineError::InvalidInput(format!(
                "unsupported balance type: {other}"
            ))),
        }
    }

    pub fn currency_type(&self) -> String {
        match self {
            BalanceType::Total => "Total".to_string(),
            BalanceType::Entered => "Entered".to_string(),
            BalanceType::From { currency } => format!("From {currency}"),
        }
    }
}

/// Whether detail rows are decomposed into per-segment columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlexMode {
    #[default]
    Detail,
    Summary,
}

impl FlexMode {
    /// Finder `mode` value.
    pub const fn as_str(self) -> &'static str {
        match self {
            FlexMode::Detail => "Detail",
            FlexMode::Summary => "Summary",
        }
    }
}

impl fmt::Display for FlexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlexMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detail" => Ok(FlexMode::Detail),
            "summary" => Ok(FlexMode::Summary),
            other => Err(EngineError::InvalidInput(format!(
                "unsupported flex mode: {other}"
            ))),
        }
    }
}

/// What an aggregation does when one (period, combination) call fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort and return the failing pair.
    #[default]
    FailFast,
    /// Record the failure and go on with the remaining pairs.
    Continue,
}

impl FromStr for FailurePolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fail_fast" => Ok(FailurePolicy::FailFast),
            "continue" => Ok(FailurePolicy::Continue),
            other => Err(EngineError::InvalidInput(format!(
                "unsupported failure policy: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceQuery {
    pub ledger_id: i64,
    pub selection: FilterSelection,
    pub period_from: String,
    pub period_to: String,
    /// Empty means the ledger's own currency.
    pub currency: String,
    pub balance_type: BalanceType,
    pub flex_mode: FlexMode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallStatus {
    /// Items accumulated over every page of the call.
    Fetched(usize),
    Failed(String),
}

/// One balance call, in iteration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallOutcome {
    pub period: String,
    pub combination: String,
    pub status: CallStatus,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BalanceReport {
    /// `None` when no call returned a row.
    pub table: Option<ResultTable>,
    pub calls: Vec<CallOutcome>,
    /// Set when no periods could be resolved because metadata is not cached.
    pub missing: Option<LookupMiss>,
}

impl BalanceReport {
    pub fn failures(&self) -> impl Iterator<Item = &CallOutcome> {
        self.calls
            .iter()
            .filter(|call| matches!(call.status, CallStatus::Failed(_)))
    }

    /// Some calls failed and their rows are absent from the table.
    pub fn is_partial(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn row_count(&self) -> usize {
        self.table.as_ref().map_or(0, ResultTable::len)
    }
}
