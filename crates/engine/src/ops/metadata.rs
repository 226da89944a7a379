//! Metadata refresh: remote reference lookups replacing cached tables.

use api_types::{
    QueryParams, currency::CurrencyItem, ledger::LedgerItem, period::PeriodItem,
    segment::SegmentValueItem,
};
use rest_client::{ItemSource, value_set_path};
use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, QueryFilter, TransactionTrait, prelude::*,
};
use serde::de::DeserializeOwned;

use crate::{
    EngineError, ResultEngine, accounting_periods, currencies, endpoints, ledgers, segment_values,
};

use super::{Engine, insert_chunked, with_tx};

/// Rows written per cached table by one refresh.
///
/// A zero count means the remote returned nothing and the cached rows were
/// kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Per segment name, in catalog order.
    pub segment_values: Vec<(String, usize)>,
    pub ledgers: usize,
    pub periods: usize,
    pub currencies: usize,
}

impl<C> Engine<C>
where
    C: ItemSource + Sync,
{
    /// Reload every cached table from the remote API.
    ///
    /// Valuesets of the catalog's segments are fetched first, then ledgers,
    /// accounting periods and currencies. Each non-empty fetch replaces its
    /// table (or valueset partition) in one DB transaction.
    pub async fn refresh_metadata(&self) -> ResultEngine<RefreshSummary> {
        let mut summary = RefreshSummary::default();

        for segment_name in self.catalog.segment_names() {
            let endpoint = value_set_path(endpoints::VALUE_SETS, segment_name);
            let items: Vec<SegmentValueItem> = self
                .fetch_typed(&endpoint, &endpoints::segment_values_params())
                .await?;
            let written = self.replace_segment_values(segment_name, items).await?;
            summary
                .segment_values
                .push((segment_name.to_string(), written));
        }

        let items: Vec<LedgerItem> = self
            .fetch_typed(endpoints::LEDGERS, &endpoints::ledgers_params())
            .await?;
        summary.ledgers = self
            .replace_table(items.into_iter().map(ledgers::ActiveModel::from).collect())
            .await?;
        tracing::info!(rows = summary.ledgers, "ledgers refreshed");

        let items: Vec<PeriodItem> = self
            .fetch_typed(endpoints::PERIODS, &endpoints::periods_params())
            .await?;
        summary.periods = self
            .replace_table(
                items
                    .into_iter()
                    .map(accounting_periods::ActiveModel::from)
                    .collect(),
            )
            .await?;
        tracing::info!(rows = summary.periods, "accounting periods refreshed");

        let items: Vec<CurrencyItem> = self
            .fetch_typed(endpoints::CURRENCIES, &endpoints::currencies_params())
            .await?;
        summary.currencies = self
            .replace_table(items.into_iter().map(currencies::ActiveModel::from).collect())
            .await?;
        tracing::info!(rows = summary.currencies, "currencies refreshed");

        tracing::info!(
            segments = summary.segment_values.len(),
            "metadata refresh completed"
        );
        Ok(summary)
    }

    async fn fetch_typed<T>(&self, endpoint: &str, params: &QueryParams) -> ResultEngine<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let items = self.client.fetch_items(endpoint, params).await?;
        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|err| {
                    tracing::error!(endpoint, "unexpected item shape: {err}");
                    EngineError::InvalidRecord(format!("{endpoint}: {err}"))
                })
            })
            .collect()
    }

    async fn replace_segment_values(
        &self,
        segment_name: &str,
        items: Vec<SegmentValueItem>,
    ) -> ResultEngine<usize> {
        if items.is_empty() {
            tracing::warn!(segment = segment_name, "no valueset values returned, keeping cache");
            return Ok(0);
        }
        let models: Vec<segment_values::ActiveModel> = items
            .into_iter()
            .map(|item| segment_values::active_model(segment_name, item))
            .collect();

        let written = with_tx!(self, |db_tx| {
            segment_values::Entity::delete_many()
                .filter(segment_values::Column::ValueSet.eq(segment_name))
                .exec(&db_tx)
                .await?;
            insert_chunked(&db_tx, models).await
        })?;
        tracing::info!(segment = segment_name, rows = written, "valueset refreshed");
        Ok(written)
    }

    /// Replace every row of `A`'s table, unless `models` is empty.
    async fn replace_table<A>(&self, models: Vec<A>) -> ResultEngine<usize>
    where
        A: ActiveModelTrait + Send,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        if models.is_empty() {
            tracing::warn!("remote returned no rows, keeping cache");
            return Ok(0);
        }
        with_tx!(self, |db_tx| {
            <A::Entity as EntityTrait>::delete_many()
                .exec(&db_tx)
                .await?;
            insert_chunked(&db_tx, models).await
        })
    }
}
