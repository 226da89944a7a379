use sea_orm::Database;
use sea_orm_migration::prelude::*;

use migration::{DEFAULT_DATABASE, Migrator, sqlite_url};

/// `DATABASE_URL` wins; otherwise the same `GLWALKER_DATABASE` file the
/// application opens.
fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        let database =
            std::env::var("GLWALKER_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());
        sqlite_url(&database)
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cmd = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    let db = Database::connect(&database_url()).await?;

    match cmd.as_str() {
        "up" => Migrator::up(&db, None).await?,
        "down" => Migrator::down(&db, None).await?,
        "fresh" => Migrator::fresh(&db).await?,
        "status" => Migrator::status(&db).await?,
        _ => {
            eprintln!("usage: migration [up|down|fresh|status]");
            std::process::exit(2);
        }
    }

    Ok(())
}
