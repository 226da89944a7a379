use std::collections::HashSet;

use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{LedgerMetadata, Lookup, LookupMiss, ResultEngine, accounting_periods};

use super::Engine;

impl<C> Engine<C> {
    /// Names of the periods spanned by `period_from..=period_to` for a ledger,
    /// ascending by start date.
    ///
    /// A period qualifies when it has the ledger's period type, starts on or
    /// after `period_from` starts and ends on or before `period_to` ends. An
    /// uncached ledger or boundary period is a [`Lookup::Missing`]; a range
    /// whose end precedes its start is an empty list.
    pub async fn resolve_periods(
        &self,
        ledger_id: i64,
        period_from: &str,
        period_to: &str,
    ) -> ResultEngine<Lookup<Vec<String>>> {
        match self.ledger(ledger_id).await? {
            Lookup::Found(ledger) => self.periods_between(&ledger, period_from, period_to).await,
            Lookup::Missing(miss) => Ok(Lookup::Missing(miss)),
        }
    }

    pub(super) async fn periods_between(
        &self,
        ledger: &LedgerMetadata,
        period_from: &str,
        period_to: &str,
    ) -> ResultEngine<Lookup<Vec<String>>> {
        let Some(from) = self.boundary(ledger, period_from).await? else {
            return Ok(Lookup::Missing(LookupMiss::Period(period_from.to_string())));
        };
        let Some(to) = self.boundary(ledger, period_to).await? else {
            return Ok(Lookup::Missing(LookupMiss::Period(period_to.to_string())));
        };

        let models = Self::ledger_periods_query(ledger)
            .filter(accounting_periods::Column::StartDate.gte(from.start_date))
            .filter(accounting_periods::Column::EndDate.lte(to.end_date))
            .order_by_asc(accounting_periods::Column::StartDate)
            .order_by_asc(accounting_periods::Column::PeriodName)
            .all(&self.database)
            .await?;

        let mut seen = HashSet::new();
        let periods: Vec<String> = models
            .into_iter()
            .map(|model| model.period_name)
            .filter(|name| seen.insert(name.clone()))
            .collect();

        tracing::debug!(
            ledger = ledger.ledger_id,
            period_from,
            period_to,
            periods = periods.len(),
            "resolved period range"
        );
        Ok(Lookup::Found(periods))
    }

    async fn boundary(
        &self,
        ledger: &LedgerMetadata,
        period_name: &str,
    ) -> ResultEngine<Option<accounting_periods::Model>> {
        let model = Self::ledger_periods_query(ledger)
            .filter(accounting_periods::Column::PeriodName.eq(period_name))
            .order_by_asc(accounting_periods::Column::StartDate)
            .one(&self.database)
            .await?;
        Ok(model)
    }
}
