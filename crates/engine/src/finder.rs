//! Finder expressions of the balances resource.
//!
//! A finder is a single query-string value made of a finder name and
//! comma-separated `key=value` pairs: `FinderName;key1=val1,key2=val2`.

use std::fmt;

use api_types::QueryParams;

use crate::endpoints::DEFAULT_FINDER_NAME;

/// Query-string key carrying the finder expression.
pub const FINDER_KEY: &str = "finder";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinderExpression {
    name: String,
    params: Vec<(String, String)>,
}

impl FinderExpression {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
        }
    }

    /// Split at the first `;`, then on `,` and the first `=` of each pair.
    ///
    /// A pair without `=` becomes a key with an empty value; a repeated key
    /// keeps its first position and its last value.
    pub fn parse(raw: &str) -> Self {
        let (name, rest) = raw.split_once(';').unwrap_or((raw, ""));
        let mut finder = Self::new(name);
        for pair in rest.split(',').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match finder.params.iter_mut().find(|(k, _)| k == key) {
                Some((_, existing)) => *existing = value.to_string(),
                None => finder.params.push((key.to_string(), value.to_string())),
            }
        }
        finder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    /// Set `key`, moving it after every other key.
    pub fn set(&mut self, key: &str, value: &str) {
        self.params.retain(|(k, _)| k != key);
        self.params.push((key.to_string(), value.to_string()));
    }
}

impl fmt::Display for FinderExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};", self.name)?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Runtime values of one balance call.
#[derive(Clone, Copy, Debug)]
pub struct BalanceFilter<'a> {
    pub combination: &'a str,
    pub period: &'a str,
    pub currency: &'a str,
    pub ledger_name: &'a str,
    pub mode: &'a str,
    pub currency_type: &'a str,
}

/// Query parameters of one balance call.
///
/// `template` is left untouched: the returned copy gets a finder whose six
/// runtime keys are set in the order `accountCombination`, `accountingPeriod`,
/// `currency`, `ledgerName`, `mode`, `currencyType`, after the template's
/// other finder keys.
pub fn balance_query_params(template: &QueryParams, filter: &BalanceFilter<'_>) -> QueryParams {
    let mut finder = template
        .get(FINDER_KEY)
        .map(FinderExpression::parse)
        .unwrap_or_else(|| FinderExpression::new(DEFAULT_FINDER_NAME));

    finder.set("accountCombination", filter.combination);
    finder.set("accountingPeriod", filter.period);
    finder.set("currency", filter.currency);
    finder.set("ledgerName", filter.ledger_name);
    finder.set("mode", filter.mode);
    finder.set("currencyType", filter.currency_type);

    template.clone().with(FINDER_KEY, finder.to_string())
}
