use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};

/// Connect to SQLite and switch the database to WAL journaling so viewer
/// reads do not block behind collector writes. The journal mode is stored
/// in the database file, so running the pragma once per startup suffices.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    db.execute_unprepared("PRAGMA journal_mode=WAL;").await?;
    Ok(db)
}
