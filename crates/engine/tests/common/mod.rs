#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use api_types::QueryParams;
use engine::{Catalog, Engine, FailurePolicy, FinderExpression, endpoints};
use migration::MigratorTrait;
use rest_client::{ClientError, ItemSource, value_set_path};
use sea_orm::Database;
use serde_json::{Value, json};

pub type Balances =
    Box<dyn Fn(&FinderExpression) -> Result<Vec<Value>, ClientError> + Send + Sync>;

/// State shared between a test and the fake it handed to the engine.
#[derive(Default)]
pub struct Shared {
    calls: Mutex<Vec<(String, QueryParams)>>,
    fixtures: Mutex<HashMap<String, Vec<Value>>>,
}

impl Shared {
    pub fn set_fixture(&self, endpoint: &str, items: Vec<Value>) {
        self.fixtures
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), items);
    }

    pub fn remove_fixture(&self, endpoint: &str) {
        self.fixtures.lock().unwrap().remove(endpoint);
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn endpoints_called(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(endpoint, _)| endpoint.clone())
            .collect()
    }

    /// Finder expressions of the balance calls, in call order.
    pub fn balance_finders(&self) -> Vec<FinderExpression> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(endpoint, _)| endpoint == endpoints::BALANCES)
            .map(|(_, params)| FinderExpression::parse(params.get("finder").unwrap()))
            .collect()
    }
}

/// Routes reference endpoints to fixtures and balance calls to a closure.
pub struct FakeApi {
    shared: Arc<Shared>,
    balances: Balances,
}

impl FakeApi {
    pub fn new(balances: Balances) -> (Self, Arc<Shared>) {
        let shared = Arc::new(Shared::default());
        for (endpoint, items) in reference_fixtures() {
            shared.set_fixture(&endpoint, items);
        }
        let api = Self {
            shared: Arc::clone(&shared),
            balances,
        };
        (api, shared)
    }
}

impl ItemSource for FakeApi {
    async fn fetch_items(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> rest_client::Result<Vec<Value>> {
        self.shared
            .calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), params.clone()));

        if endpoint == endpoints::BALANCES {
            let finder = params
                .get("finder")
                .map(FinderExpression::parse)
                .ok_or_else(|| ClientError::Decode("missing finder".to_string()))?;
            return (self.balances)(&finder);
        }

        self.shared
            .fixtures
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(endpoint.to_string()))
    }
}

pub const LEDGER_FILE: &str = r#"LEDGERS_LIST([
    {"ledger_id": 1, "SEGMENT_NUMBER": 3, "SEGMENT_NAME": "ACCOUNT", "VALUE_SET_NAME": "ACCOUNT_VS", "VALUE_SET_DESCRIPTION": "Account"},
    {"ledger_id": 1, "SEGMENT_NUMBER": 1, "SEGMENT_NAME": "COMPANY", "VALUE_SET_NAME": "COMPANY_VS", "VALUE_SET_DESCRIPTION": "Company"},
    {"ledger_id": 1, "SEGMENT_NUMBER": 2, "SEGMENT_NAME": "COST_CENTER", "VALUE_SET_NAME": "CC_VS", "VALUE_SET_DESCRIPTION": "Cost Center"},
    {"ledger_id": 2, "SEGMENT_NUMBER": 1, "SEGMENT_NAME": "COMPANY", "VALUE_SET_NAME": "COMPANY_VS", "VALUE_SET_DESCRIPTION": "Company"},
    {"ledger_id": 2, "SEGMENT_NUMBER": 2, "SEGMENT_NAME": "ACCOUNT", "VALUE_SET_NAME": "ACCOUNT_VS", "VALUE_SET_DESCRIPTION": "Account"}
])"#;

pub fn catalog() -> Catalog {
    Catalog::parse(LEDGER_FILE).unwrap()
}

fn ledger(id: i64, name: &str, currency: &str) -> Value {
    json!({
        "LedgerId": id,
        "Name": name,
        "CurrencyCode": currency,
        "AccountedPeriodType": "Month",
        "PeriodSetName": "Accounting",
        "ChartOfAccountsId": 101,
        "LedgerCategoryCode": "PRIMARY",
    })
}

fn period(name: &str, set: &str, kind: &str, number: i32, start: &str, end: &str) -> Value {
    json!({
        "PeriodNameId": name,
        "PeriodSetNameId": set,
        "PeriodType": kind,
        "PeriodYear": 2024,
        "PeriodNumber": number,
        "StartDate": start,
        "EndDate": end,
    })
}

fn segment_value(value: &str, description: &str) -> Value {
    json!({"Value": value, "Description": description, "EnabledFlag": "Y"})
}

pub fn reference_fixtures() -> Vec<(String, Vec<Value>)> {
    vec![
        (
            value_set_path(endpoints::VALUE_SETS, "COMPANY"),
            vec![segment_value("101", "Italy"), segment_value("102", "France")],
        ),
        (
            value_set_path(endpoints::VALUE_SETS, "COST_CENTER"),
            vec![segment_value("200", "Sales")],
        ),
        (
            value_set_path(endpoints::VALUE_SETS, "ACCOUNT"),
            vec![segment_value("4000", "Revenue")],
        ),
        (
            endpoints::LEDGERS.to_string(),
            vec![
                ledger(2, "US Primary Ledger", "USD"),
                ledger(1, "EU Primary Ledger", "EUR"),
                ledger(3, "Archive Ledger", "EUR"),
            ],
        ),
        (
            endpoints::PERIODS.to_string(),
            vec![
                period("Feb-24", "Accounting", "Month", 3, "2024-02-01", "2024-02-29"),
                period("Jan-24", "Accounting", "Month", 1, "2024-01-01", "2024-01-31"),
                period("Adj-Jan-24", "Accounting", "Month", 2, "2024-01-31", "2024-01-31"),
                period("Mar-24", "Accounting", "Month", 4, "2024-03-01", "2024-03-31"),
                period("Q1-24", "Accounting", "Quarter", 1, "2024-01-01", "2024-03-31"),
                period("Jan-24", "Fiscal", "Month", 7, "2024-01-01", "2024-01-31"),
            ],
        ),
        (
            endpoints::CURRENCIES.to_string(),
            vec![
                json!({"CurrencyCode": "USD", "Name": "US Dollar"}),
                json!({"CurrencyCode": "EUR", "Name": "Euro"}),
            ],
        ),
    ]
}

/// One balance row per call, derived from the call's finder.
pub fn balance_record(finder: &FinderExpression, line: usize) -> Value {
    let combination = finder
        .get("accountCombination")
        .unwrap_or_default()
        .replace('%', "000");
    json!({
        "LedgerName": finder.get("ledgerName"),
        "PeriodName": finder.get("accountingPeriod"),
        "Currency": finder.get("currency"),
        "DetailAccountCombination": combination,
        "BeginningBalance": "100.00",
        "PeriodActivity": format!("{}.25", line + 1),
        "EndingBalance": if line == 0 { "101.25" } else { "" },
        "CurrencyType": finder.get("currencyType"),
    })
}

pub fn echo_balances(rows_per_call: usize) -> Balances {
    Box::new(move |finder| {
        Ok((0..rows_per_call)
            .map(|line| balance_record(finder, line))
            .collect())
    })
}

pub async fn new_engine(api: FakeApi, policy: FailurePolicy) -> Engine<FakeApi> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder()
        .database(db)
        .client(api)
        .catalog(catalog())
        .failure_policy(policy)
        .build()
        .await
        .unwrap()
}

/// An engine whose store has been refreshed once, with the refresh calls
/// cleared from the recorder.
pub async fn seeded_engine(
    balances: Balances,
    policy: FailurePolicy,
) -> (Engine<FakeApi>, Arc<Shared>) {
    let (api, shared) = FakeApi::new(balances);
    let engine = new_engine(api, policy).await;
    engine.refresh_metadata().await.unwrap();
    shared.clear_calls();
    (engine, shared)
}
