mod common;

use engine::{EngineError, FailurePolicy, Lookup, LookupMiss, endpoints};
use rest_client::value_set_path;
use serde_json::json;

use common::{FakeApi, echo_balances, new_engine, seeded_engine};

#[tokio::test]
async fn refresh_populates_every_table() {
    let (api, shared) = FakeApi::new(echo_balances(1));
    let engine = new_engine(api, FailurePolicy::FailFast).await;
    assert!(!engine.has_metadata().await.unwrap());

    let summary = engine.refresh_metadata().await.unwrap();

    assert_eq!(
        summary.segment_values,
        vec![
            ("COMPANY".to_string(), 2),
            ("COST_CENTER".to_string(), 1),
            ("ACCOUNT".to_string(), 1)
        ]
    );
    assert_eq!(summary.ledgers, 3);
    assert_eq!(summary.periods, 6);
    assert_eq!(summary.currencies, 2);
    assert!(engine.has_metadata().await.unwrap());

    // Valuesets first, then ledgers, periods and currencies.
    assert_eq!(
        shared.endpoints_called(),
        vec![
            value_set_path(endpoints::VALUE_SETS, "COMPANY"),
            value_set_path(endpoints::VALUE_SETS, "COST_CENTER"),
            value_set_path(endpoints::VALUE_SETS, "ACCOUNT"),
            endpoints::LEDGERS.to_string(),
            endpoints::PERIODS.to_string(),
            endpoints::CURRENCIES.to_string(),
        ]
    );
}

#[tokio::test]
async fn ledgers_are_limited_to_the_catalog_and_sorted_by_name() {
    let (engine, _shared) = seeded_engine(echo_balances(1), FailurePolicy::FailFast).await;

    let names: Vec<String> = engine
        .ledgers()
        .await
        .unwrap()
        .into_iter()
        .map(|ledger| ledger.name)
        .collect();
    assert_eq!(names, vec!["EU Primary Ledger", "US Primary Ledger"]);

    let codes: Vec<String> = engine
        .currencies()
        .await
        .unwrap()
        .into_iter()
        .map(|currency| currency.code)
        .collect();
    assert_eq!(codes, vec!["EUR", "USD"]);

    let ledger = engine.ledger(1).await.unwrap().found().unwrap();
    assert_eq!(ledger.currency_code, "EUR");
    assert_eq!(ledger.accounted_period_type, "Month");
    assert_eq!(
        engine.ledger(42).await.unwrap(),
        Lookup::Missing(LookupMiss::Ledger(42))
    );
}

#[tokio::test]
async fn refresh_replaces_tables_wholesale() {
    let (engine, shared) = seeded_engine(echo_balances(1), FailurePolicy::FailFast).await;

    shared.set_fixture(
        endpoints::LEDGERS,
        vec![json!({
            "LedgerId": 2,
            "Name": "US Ledger (renamed)",
            "CurrencyCode": "USD",
            "AccountedPeriodType": "Month",
        })],
    );
    shared.set_fixture(
        &value_set_path(endpoints::VALUE_SETS, "COMPANY"),
        vec![json!({"Value": "103", "Description": "Spain", "EnabledFlag": "N"})],
    );
    engine.refresh_metadata().await.unwrap();

    let ledgers = engine.ledgers().await.unwrap();
    assert_eq!(ledgers.len(), 1);
    assert_eq!(ledgers[0].name, "US Ledger (renamed)");
    assert!(engine.ledger(1).await.unwrap().is_missing());

    let companies = engine.segment_values("COMPANY").await.unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].value, "103");
    assert!(!companies[0].enabled);

    // Other valueset partitions are untouched.
    let accounts = engine.segment_values("ACCOUNT").await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].value, "4000");
}

#[tokio::test]
async fn empty_fetch_keeps_cached_rows() {
    let (engine, shared) = seeded_engine(echo_balances(1), FailurePolicy::FailFast).await;

    shared.set_fixture(endpoints::CURRENCIES, Vec::new());
    let summary = engine.refresh_metadata().await.unwrap();

    assert_eq!(summary.currencies, 0);
    assert_eq!(engine.currencies().await.unwrap().len(), 2);
}

#[tokio::test]
async fn refresh_propagates_remote_errors() {
    let (engine, shared) = seeded_engine(echo_balances(1), FailurePolicy::FailFast).await;

    shared.remove_fixture(endpoints::PERIODS);
    let err = engine.refresh_metadata().await.unwrap_err();

    assert!(matches!(err, EngineError::Client(_)));
    // Tables refreshed before the failure keep their rows.
    assert_eq!(engine.ledgers().await.unwrap().len(), 2);
}

#[tokio::test]
async fn unexpected_item_shape_is_an_invalid_record() {
    let (engine, shared) = seeded_engine(echo_balances(1), FailurePolicy::FailFast).await;

    shared.set_fixture(endpoints::CURRENCIES, vec![json!({"Code": "EUR"})]);
    let err = engine.refresh_metadata().await.unwrap_err();

    assert!(matches!(err, EngineError::InvalidRecord(_)));
}

#[tokio::test]
async fn ledger_periods_are_newest_first() {
    let (engine, _shared) = seeded_engine(echo_balances(1), FailurePolicy::FailFast).await;

    let names: Vec<String> = engine
        .ledger_periods(1)
        .await
        .unwrap()
        .found()
        .unwrap()
        .into_iter()
        .map(|period| period.name)
        .collect();
    assert_eq!(names, vec!["Mar-24", "Feb-24", "Adj-Jan-24", "Jan-24"]);

    assert_eq!(
        engine.ledger_periods(42).await.unwrap(),
        Lookup::Missing(LookupMiss::Ledger(42))
    );
}

#[tokio::test]
async fn period_range_is_ordered_and_repeatable() {
    let (engine, _shared) = seeded_engine(echo_balances(1), FailurePolicy::FailFast).await;

    let first = engine.resolve_periods(1, "Jan-24", "Feb-24").await.unwrap();
    let second = engine.resolve_periods(1, "Jan-24", "Feb-24").await.unwrap();

    assert_eq!(
        first,
        Lookup::Found(vec![
            "Jan-24".to_string(),
            "Adj-Jan-24".to_string(),
            "Feb-24".to_string()
        ])
    );
    assert_eq!(first, second);
}

#[tokio::test]
async fn same_boundary_resolves_to_one_period() {
    let (engine, _shared) = seeded_engine(echo_balances(1), FailurePolicy::FailFast).await;

    let periods = engine.resolve_periods(1, "Mar-24", "Mar-24").await.unwrap();
    assert_eq!(periods, Lookup::Found(vec!["Mar-24".to_string()]));
}

#[tokio::test]
async fn uncached_boundaries_are_lookup_misses() {
    let (engine, _shared) = seeded_engine(echo_balances(1), FailurePolicy::FailFast).await;

    assert_eq!(
        engine.resolve_periods(1, "Jan-24", "Dec-99").await.unwrap(),
        Lookup::Missing(LookupMiss::Period("Dec-99".to_string()))
    );
    // Quarters are not the ledger's period type.
    assert_eq!(
        engine.resolve_periods(1, "Q1-24", "Mar-24").await.unwrap(),
        Lookup::Missing(LookupMiss::Period("Q1-24".to_string()))
    );
    assert_eq!(
        engine.resolve_periods(9, "Jan-24", "Feb-24").await.unwrap(),
        Lookup::Missing(LookupMiss::Ledger(9))
    );
}

#[tokio::test]
async fn reversed_range_is_empty() {
    let (engine, _shared) = seeded_engine(echo_balances(1), FailurePolicy::FailFast).await;

    let periods = engine.resolve_periods(1, "Mar-24", "Jan-24").await.unwrap();
    assert_eq!(periods, Lookup::Found(Vec::new()));
}

#[tokio::test]
async fn periods_without_a_set_match_any_ledger_set() {
    let (engine, shared) = seeded_engine(echo_balances(1), FailurePolicy::FailFast).await;
    shared.set_fixture(
        endpoints::PERIODS,
        vec![
            json!({"PeriodNameId": "Feb-24", "PeriodType": "Month",
                   "StartDate": "2024-02-01", "EndDate": "2024-02-29"}),
            json!({"PeriodNameId": "Jan-24", "PeriodType": "Month",
                   "StartDate": "2024-01-01", "EndDate": "2024-01-31"}),
            json!({"PeriodNameId": "Mar-24", "PeriodSetNameId": "Fiscal", "PeriodType": "Month",
                   "StartDate": "2024-03-01", "EndDate": "2024-03-31"}),
        ],
    );
    engine.refresh_metadata().await.unwrap();

    assert_eq!(
        engine.resolve_periods(1, "Jan-24", "Feb-24").await.unwrap(),
        Lookup::Found(vec!["Jan-24".to_string(), "Feb-24".to_string()])
    );
    // Periods of another set stay out.
    assert_eq!(
        engine.resolve_periods(1, "Mar-24", "Mar-24").await.unwrap(),
        Lookup::Missing(LookupMiss::Period("Mar-24".to_string()))
    );
}
