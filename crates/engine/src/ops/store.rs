//! Reads from the metadata store.

use sea_orm::{Condition, PaginatorTrait, QueryFilter, QueryOrder, Select, prelude::*};

use crate::{
    AccountingPeriod, CurrencyMetadata, LedgerMetadata, Lookup, LookupMiss, ResultEngine,
    SegmentValue, accounting_periods, currencies, ledgers, segment_values,
};

use super::Engine;

impl<C> Engine<C> {
    /// Cached ledgers that appear in the catalog, ordered by name.
    pub async fn ledgers(&self) -> ResultEngine<Vec<LedgerMetadata>> {
        let models = ledgers::Entity::find()
            .filter(ledgers::Column::LedgerId.is_in(self.catalog.ledger_ids()))
            .order_by_asc(ledgers::Column::Name)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(LedgerMetadata::from).collect())
    }

    pub async fn ledger(&self, ledger_id: i64) -> ResultEngine<Lookup<LedgerMetadata>> {
        let model = ledgers::Entity::find_by_id(ledger_id)
            .one(&self.database)
            .await?;
        Ok(match model {
            Some(model) => Lookup::Found(model.into()),
            None => Lookup::Missing(LookupMiss::Ledger(ledger_id)),
        })
    }

    /// Enabled currencies, ordered by code.
    pub async fn currencies(&self) -> ResultEngine<Vec<CurrencyMetadata>> {
        let models = currencies::Entity::find()
            .order_by_asc(currencies::Column::CurrencyCode)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(CurrencyMetadata::from).collect())
    }

    /// Periods a ledger can be queried for, newest first.
    pub async fn ledger_periods(
        &self,
        ledger_id: i64,
    ) -> ResultEngine<Lookup<Vec<AccountingPeriod>>> {
        let ledger = match self.ledger(ledger_id).await? {
            Lookup::Found(ledger) => ledger,
            Lookup::Missing(miss) => return Ok(Lookup::Missing(miss)),
        };

        let models = Self::ledger_periods_query(&ledger)
            .order_by_desc(accounting_periods::Column::PeriodYear)
            .order_by_desc(accounting_periods::Column::PeriodNumber)
            .order_by_desc(accounting_periods::Column::StartDate)
            .all(&self.database)
            .await?;
        Ok(Lookup::Found(
            models.into_iter().map(AccountingPeriod::from).collect(),
        ))
    }

    /// Cached values of a segment's valueset, ordered by value.
    pub async fn segment_values(&self, segment_name: &str) -> ResultEngine<Vec<SegmentValue>> {
        let models = segment_values::Entity::find()
            .filter(segment_values::Column::ValueSet.eq(segment_name))
            .order_by_asc(segment_values::Column::Value)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(SegmentValue::from).collect())
    }

    /// Whether a metadata refresh has ever completed.
    ///
    /// Currencies are loaded last, so their presence marks a full refresh.
    pub async fn has_metadata(&self) -> ResultEngine<bool> {
        let count = currencies::Entity::find().count(&self.database).await?;
        Ok(count > 0)
    }

    /// Periods of the ledger's period type.
    ///
    /// When the ledger names a period set, periods of another set are left out;
    /// periods cached without a set still qualify.
    pub(super) fn ledger_periods_query(
        ledger: &LedgerMetadata,
    ) -> Select<accounting_periods::Entity> {
        let query = accounting_periods::Entity::find().filter(
            accounting_periods::Column::PeriodType.eq(ledger.accounted_period_type.as_str()),
        );
        match &ledger.period_set_name {
            Some(set) => query.filter(
                Condition::any()
                    .add(accounting_periods::Column::PeriodSetName.eq(set.as_str()))
                    .add(accounting_periods::Column::PeriodSetName.is_null()),
            ),
            None => query,
        }
    }
}
