//! Cached flexfield valueset values.
//!
//! Rows are partitioned by `value_set`, the segment name the values were
//! fetched for. A refresh replaces one partition at a time.

use api_types::segment::SegmentValueItem;
use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentValue {
    pub value: String,
    pub description: Option<String>,
    /// `EnabledFlag` is `Y`.
    pub enabled: bool,
    pub start_date_active: Option<NaiveDate>,
    pub end_date_active: Option<NaiveDate>,
}

impl From<Model> for SegmentValue {
    fn from(model: Model) -> Self {
        Self {
            enabled: model
                .enabled_flag
                .as_deref()
                .is_some_and(|flag| flag.eq_ignore_ascii_case("Y")),
            value: model.value,
            description: model.description,
            start_date_active: model.start_date_active,
            end_date_active: model.end_date_active,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "segment_values")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub value_set: String,
    pub value: String,
    pub description: Option<String>,
    pub enabled_flag: Option<String>,
    pub start_date_active: Option<Date>,
    pub end_date_active: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn active_model(value_set: &str, item: SegmentValueItem) -> ActiveModel {
    ActiveModel {
        id: ActiveValue::NotSet,
        value_set: ActiveValue::Set(value_set.to_string()),
        value: ActiveValue::Set(item.value),
        description: ActiveValue::Set(item.description),
        enabled_flag: ActiveValue::Set(item.enabled_flag),
        start_date_active: ActiveValue::Set(item.start_date_active),
        end_date_active: ActiveValue::Set(item.end_date_active),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_flag_is_read_case_insensitively() {
        let model = Model {
            id: 1,
            value_set: "COMPANY".to_string(),
            value: "101".to_string(),
            description: Some("Italy".to_string()),
            enabled_flag: Some("y".to_string()),
            start_date_active: None,
            end_date_active: None,
        };
        assert!(SegmentValue::from(model.clone()).enabled);

        let disabled = Model {
            enabled_flag: None,
            ..model
        };
        assert!(!SegmentValue::from(disabled).enabled);
    }
}
