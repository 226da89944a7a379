//! Cached accounting periods.
//!
//! Periods of every period set and period type are kept in one table; a
//! ledger's own periods are those matching its accounted period type (and its
//! period set, when the ledger names one).

use api_types::period::PeriodItem;
use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountingPeriod {
    pub name: String,
    pub period_type: String,
    pub period_year: Option<i32>,
    pub period_number: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<Model> for AccountingPeriod {
    fn from(model: Model) -> Self {
        Self {
            name: model.period_name,
            period_type: model.period_type,
            period_year: model.period_year,
            period_number: model.period_number,
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounting_periods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub period_name: String,
    pub period_set_name: Option<String>,
    pub period_type: String,
    pub period_year: Option<i32>,
    pub period_number: Option<i32>,
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<PeriodItem> for ActiveModel {
    fn from(item: PeriodItem) -> Self {
        Self {
            id: ActiveValue::NotSet,
            period_name: ActiveValue::Set(item.period_name_id),
            period_set_name: ActiveValue::Set(item.period_set_name_id),
            period_type: ActiveValue::Set(item.period_type),
            period_year: ActiveValue::Set(item.period_year),
            period_number: ActiveValue::Set(item.period_number),
            start_date: ActiveValue::Set(item.start_date),
            end_date: ActiveValue::Set(item.end_date),
        }
    }
}
