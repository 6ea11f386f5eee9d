//! Unified database connector. Does not run migrations; `migration::migrate`
//! is invoked separately at startup.

use sea_orm::{Database, DatabaseConnection};

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

pub async fn connect_db(profile: DbProfile, owner: DbOwner) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile, owner)?;
    let conn = Database::connect(&database_url).await?;
    Ok(conn)
}
