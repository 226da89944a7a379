use rest_client::ItemSource;

use crate::{
    BalanceFilter, BalanceQuery, BalanceReport, CallOutcome, CallStatus, EngineError,
    FailurePolicy, FlexMode, Lookup, NUMERIC_COLUMNS, ResultEngine, ResultTable,
    balance_query_params, endpoints, expand_combinations,
};

use super::Engine;

impl<C> Engine<C>
where
    C: ItemSource + Sync,
{
    /// Fetch the balances of every (period, combination) pair of `query`.
    ///
    /// Periods are the outer loop and combinations the inner one, so rows come
    /// out period-major. In [`FlexMode::Detail`] the combination column is
    /// split into one column per segment and the balance columns are made
    /// numeric; [`FlexMode::Summary`] rows are returned as received.
    ///
    /// A ledger missing from the store is an error. Missing boundary periods
    /// give a report without calls whose `missing` field names the period.
    pub async fn account_balances(&self, query: &BalanceQuery) -> ResultEngine<BalanceReport> {
        let ledger = match self.ledger(query.ledger_id).await? {
            Lookup::Found(ledger) => ledger,
            Lookup::Missing(miss) => return Err(EngineError::KeyNotFound(miss.to_string())),
        };

        let layout = self.catalog.layout(ledger.ledger_id);
        if layout.is_empty() {
            tracing::warn!(
                ledger = ledger.ledger_id,
                "ledger has no segments in the catalog, combinations cannot be filtered"
            );
        }
        let combinations = expand_combinations(&layout, &query.selection);

        let periods = match self
            .periods_between(&ledger, &query.period_from, &query.period_to)
            .await?
        {
            Lookup::Found(periods) => periods,
            Lookup::Missing(miss) => {
                tracing::warn!("{miss}, refresh the metadata");
                return Ok(BalanceReport {
                    missing: Some(miss),
                    ..BalanceReport::default()
                });
            }
        };

        let currency = if query.currency.trim().is_empty() {
            ledger.currency_code.as_str()
        } else {
            query.currency.as_str()
        };
        let currency_type = query.balance_type.currency_type();
        tracing::info!(
            ledger = %ledger.name,
            periods = periods.len(),
            combinations = combinations.len(),
            currency,
            currency_type = %currency_type,
            mode = %query.flex_mode,
            "querying balances"
        );

        let mut records = Vec::new();
        let mut calls = Vec::with_capacity(periods.len() * combinations.len());
        for period in &periods {
            for combination in &combinations {
                let params = balance_query_params(
                    &self.balances_template,
                    &BalanceFilter {
                        combination,
                        period,
                        currency,
                        ledger_name: &ledger.name,
                        mode: query.flex_mode.as_str(),
                        currency_type: &currency_type,
                    },
                );

                let status = match self.client.fetch_items(endpoints::BALANCES, &params).await {
                    Ok(items) => {
                        let fetched = items.len();
                        records.extend(items);
                        CallStatus::Fetched(fetched)
                    }
                    Err(source) => match self.failure_policy {
                        FailurePolicy::FailFast => {
                            return Err(EngineError::Remote {
                                period: period.clone(),
                                combination: combination.clone(),
                                source,
                            });
                        }
                        FailurePolicy::Continue => {
                            tracing::warn!(period, combination, "skipping failed call: {source}");
                            CallStatus::Failed(source.to_string())
                        }
                    },
                };
                calls.push(CallOutcome {
                    period: period.clone(),
                    combination: combination.clone(),
                    status,
                });
            }
        }

        if records.is_empty() {
            return Ok(BalanceReport {
                table: None,
                calls,
                missing: None,
            });
        }

        let mut table = ResultTable::from_records(records)?;
        if query.flex_mode == FlexMode::Detail {
            table = table.split_combination(&layout)?;
            table.coerce_numeric(&NUMERIC_COLUMNS);
        }
        tracing::info!(rows = table.len(), calls = calls.len(), "balances aggregated");

        Ok(BalanceReport {
            table: Some(table),
            calls,
            missing: None,
        })
    }
}
