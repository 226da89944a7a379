//! Metadata cache schema.
//!
//! Every table is a cache of a remote reference resource and is replaced
//! wholesale on refresh:
//!
//! - `ledgers`: primary ledgers
//! - `accounting_periods`: periods of every period set
//! - `currencies`: enabled currencies
//! - `segment_values`: flexfield valueset values, partitioned by `value_set`

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Ledgers {
    Table,
    LedgerId,
    Name,
    CurrencyCode,
    AccountedPeriodType,
    PeriodSetName,
    ChartOfAccountsId,
    Description,
    LedgerCategoryCode,
}

#[derive(Iden)]
enum AccountingPeriods {
    Table,
    Id,
    PeriodName,
    PeriodSetName,
    PeriodType,
    PeriodYear,
    PeriodNumber,
    StartDate,
    EndDate,
}

#[derive(Iden)]
enum Currencies {
    Table,
    CurrencyCode,
    Name,
}

#[derive(Iden)]
enum SegmentValues {
    Table,
    Id,
    ValueSet,
    Value,
    Description,
    EnabledFlag,
    StartDateActive,
    EndDateActive,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ledgers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ledgers::LedgerId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ledgers::Name).string().not_null())
                    .col(ColumnDef::new(Ledgers::CurrencyCode).string().not_null())
                    .col(
                        ColumnDef::new(Ledgers::AccountedPeriodType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Ledgers::PeriodSetName).string())
                    .col(ColumnDef::new(Ledgers::ChartOfAccountsId).big_integer())
                    .col(ColumnDef::new(Ledgers::Description).string())
                    .col(ColumnDef::new(Ledgers::LedgerCategoryCode).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AccountingPeriods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountingPeriods::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AccountingPeriods::PeriodName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AccountingPeriods::PeriodSetName).string())
                    .col(
                        ColumnDef::new(AccountingPeriods::PeriodType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AccountingPeriods::PeriodYear).integer())
                    .col(ColumnDef::new(AccountingPeriods::PeriodNumber).integer())
                    .col(ColumnDef::new(AccountingPeriods::StartDate).date().not_null())
                    .col(ColumnDef::new(AccountingPeriods::EndDate).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-accounting_periods-type-start")
                    .table(AccountingPeriods::Table)
                    .col(AccountingPeriods::PeriodType)
                    .col(AccountingPeriods::StartDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Currencies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Currencies::CurrencyCode)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Currencies::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SegmentValues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SegmentValues::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SegmentValues::ValueSet).string().not_null())
                    .col(ColumnDef::new(SegmentValues::Value).string().not_null())
                    .col(ColumnDef::new(SegmentValues::Description).string())
                    .col(ColumnDef::new(SegmentValues::EnabledFlag).string())
                    .col(ColumnDef::new(SegmentValues::StartDateActive).date())
                    .col(ColumnDef::new(SegmentValues::EndDateActive).date())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-segment_values-value_set")
                    .table(SegmentValues::Table)
                    .col(SegmentValues::ValueSet)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SegmentValues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Currencies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountingPeriods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ledgers::Table).to_owned())
            .await?;
        Ok(())
    }
}
