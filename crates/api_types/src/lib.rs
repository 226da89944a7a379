//! Wire types of the accounting REST API.
//!
//! Reference lookups (ledgers, periods, currencies, valueset values) are typed;
//! balance rows stay as raw JSON objects because their column set is decided by
//! the `fields` parameter of each request.

use serde::{Deserialize, Serialize};

/// Ordered query-string parameters.
///
/// Order is kept so that requests (and the `finder` expression built from a
/// template) are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite `key` in place when present, append it otherwise.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

/// One page of a collection resource.
///
/// `items` is mandatory: a body without it is not a collection response.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(rename = "hasMore", default)]
    pub has_more: bool,
}

pub mod ledger {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct LedgerItem {
        pub ledger_id: i64,
        pub name: String,
        pub currency_code: String,
        pub accounted_period_type: String,
        #[serde(default)]
        pub period_set_name: Option<String>,
        #[serde(default)]
        pub chart_of_accounts_id: Option<i64>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub ledger_category_code: Option<String>,
    }
}

pub mod period {
    use chrono::NaiveDate;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct PeriodItem {
        pub period_name_id: String,
        #[serde(default)]
        pub period_set_name_id: Option<String>,
        pub period_type: String,
        #[serde(default)]
        pub period_year: Option<i32>,
        #[serde(default)]
        pub period_number: Option<i32>,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }
}

pub mod currency {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct CurrencyItem {
        pub currency_code: String,
        pub name: String,
    }
}

pub mod segment {
    use chrono::NaiveDate;

    use super::*;

    /// A value of a flexfield segment's valueset.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct SegmentValueItem {
        pub value: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub enabled_flag: Option<String>,
        #[serde(default)]
        pub start_date_active: Option<NaiveDate>,
        #[serde(default)]
        pub end_date_active: Option<NaiveDate>,
    }
}
