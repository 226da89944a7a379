use api_types::currency::CurrencyItem;
use sea_orm::entity::{ActiveValue, prelude::*};

/// An enabled currency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyMetadata {
    pub code: String,
    pub name: String,
}

impl From<Model> for CurrencyMetadata {
    fn from(model: Model) -> Self {
        Self {
            code: model.currency_code,
            name: model.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "currencies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub currency_code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<CurrencyItem> for ActiveModel {
    fn from(item: CurrencyItem) -> Self {
        Self {
            currency_code: ActiveValue::Set(item.currency_code),
            name: ActiveValue::Set(item.name),
        }
    }
}
