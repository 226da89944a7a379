//! Resource paths and default query parameters of the accounting REST API.

use api_types::QueryParams;

pub const LEDGERS: &str = "/fscmRestApi/resources/11.13.18.05/ledgersLOV";
pub const PERIODS: &str = "/fscmRestApi/resources/11.13.18.05/accountingPeriodsLOV";
pub const VALUE_SETS: &str = "/fscmRestApi/resources/11.13.18.05/valueSets/";
pub const BALANCES: &str = "/fscmRestApi/resources/11.13.18.05/ledgerBalances";
pub const CURRENCIES: &str = "/fscmRestApi/resources/11.13.18.05/currenciesLOV";

pub const DEFAULT_FINDER_NAME: &str = "AccountBalanceFinder";

const BALANCE_FIELDS: &str = "AccountGroupName,AccountName,LedgerSetName,LedgerName,Currency,\
CurrentAccountingPeriod,PeriodName,CurrentPeriodBalance,BudgetBalance,Scenario,AccountCombination,\
DetailAccountCombination,BeginningBalance,PeriodActivity,EndingBalance,AmountType,CurrencyType,ErrorDetail";

const BALANCE_FINDER: &str = "AccountBalanceFinder;accountCombination=%,accountingPeriod=,\
currency=,ledgerName=,mode=Detail,currencyType=Total";

/// Primary ledgers only.
pub fn ledgers_params() -> QueryParams {
    QueryParams::new()
        .with("onlyData", "true")
        .with("q", "LedgerTypeCode=\"L\"")
        .with(
            "fields",
            "AccountedPeriodType,ChartOfAccountsId,Description,EnableBudgetaryControlFlag,\
LedgerCategoryCode,LedgerId,Name,PeriodSetName,CurrencyCode",
        )
}

pub fn periods_params() -> QueryParams {
    QueryParams::new().with("onlyData", "true")
}

pub fn segment_values_params() -> QueryParams {
    QueryParams::new()
        .with("onlyData", "true")
        .with(
            "fields",
            "Value,Description,EnabledFlag,StartDateActive,EndDateActive",
        )
}

/// Enabled currencies only.
pub fn currencies_params() -> QueryParams {
    QueryParams::new()
        .with("onlyData", "true")
        .with("q", "EnabledFlag=Y")
        .with("fields", "CurrencyCode,Name")
}

/// Template the per-call balance parameters are derived from.
pub fn balances_template() -> QueryParams {
    QueryParams::new()
        .with("onlyData", "true")
        .with("fields", BALANCE_FIELDS)
        .with("finder", BALANCE_FINDER)
}
