pub use sea_orm_migration::prelude::*;

mod m20241014_000001_metadata;

/// SQLite file of the metadata store when nothing else is configured.
pub const DEFAULT_DATABASE: &str = "ledgers.db";

/// Connection URL of a SQLite store; `:memory:` selects an in-memory database.
pub fn sqlite_url(database: &str) -> String {
    if database == ":memory:" {
        String::from("sqlite::memory:")
    } else {
        format!("sqlite:{database}?mode=rwc")
    }
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20241014_000001_metadata::Migration)]
    }
}
