//! Account-balance retrieval over a cached ledger catalog.
//!
//! The [`Engine`] owns the metadata store (a SQLite cache of ledgers,
//! accounting periods, currencies and segment valuesets), the ledger
//! [`Catalog`] read from the ledger definition file, and a remote
//! [`ItemSource`](rest_client::ItemSource).
//!
//! A balance query is answered by expanding the segment filters into account
//! combinations, resolving the period range into concrete periods, issuing one
//! paginated call per (period, combination) pair and flattening the results
//! into a [`ResultTable`].

pub use accounting_periods::AccountingPeriod;
pub use catalog::{Catalog, CatalogError, SegmentDefinition, SegmentLayout, SegmentSlot};
pub use combinations::{FilterSelection, WILDCARD, expand_combinations};
pub use currencies::CurrencyMetadata;
pub use error::EngineError;
pub use finder::{BalanceFilter, FinderExpression, balance_query_params};
pub use ledgers::LedgerMetadata;
pub use lookup::{Lookup, LookupMiss};
pub use ops::{Engine, EngineBuilder, RefreshSummary};
pub use query::{
    BalanceQuery, BalanceReport, BalanceType, CallOutcome, CallStatus, FailurePolicy, FlexMode,
};
pub use segment_values::SegmentValue;
pub use table::{Cell, DETAIL_COMBINATION_COLUMN, NUMERIC_COLUMNS, ResultTable};

pub mod endpoints;

mod accounting_periods;
mod catalog;
mod combinations;
mod currencies;
mod error;
mod finder;
mod ledgers;
mod lookup;
mod ops;
mod query;
mod segment_values;
mod table;

type ResultEngine<T> = Result<T, EngineError>;
