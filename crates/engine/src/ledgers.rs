//! Cached primary ledgers.

use api_types::ledger::LedgerItem;
use sea_orm::entity::{ActiveValue, prelude::*};

/// The parts of a cached ledger a balance query needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerMetadata {
    pub ledger_id: i64,
    pub name: String,
    pub currency_code: String,
    /// Period type the ledger's periods are resolved against.
    pub accounted_period_type: String,
    pub period_set_name: Option<String>,
}

impl From<Model> for LedgerMetadata {
    fn from(model: Model) -> Self {
        Self {
            ledger_id: model.ledger_id,
            name: model.name,
            currency_code: model.currency_code,
            accounted_period_type: model.accounted_period_type,
            period_set_name: model.period_set_name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ledgers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub ledger_id: i64,
    pub name: String,
    pub currency_code: String,
    pub accounted_period_type: String,
    pub period_set_name: Option<String>,
    pub chart_of_accounts_id: Option<i64>,
    pub description: Option<String>,
    pub ledger_category_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<LedgerItem> for ActiveModel {
    fn from(item: LedgerItem) -> Self {
        Self {
            ledger_id: ActiveValue::Set(item.ledger_id),
            name: ActiveValue::Set(item.name),
            currency_code: ActiveValue::Set(item.currency_code),
            accounted_period_type: ActiveValue::Set(item.accounted_period_type),
            period_set_name: ActiveValue::Set(item.period_set_name),
            chart_of_accounts_id: ActiveValue::Set(item.chart_of_accounts_id),
            description: ActiveValue::Set(item.description),
            ledger_category_code: ActiveValue::Set(item.ledger_category_code),
        }
    }
}
