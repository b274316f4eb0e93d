use anyhow::Result;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use std::time::Duration;

use crate::config::config_model::Database;

pub type PgPoolSquad = Pool<ConnectionManager<PgConnection>>;

/// Builds the bounded pool shared by every request. Sizes and lifetime are
/// fixed at startup.
pub fn establish_connection(database: &Database) -> Result<PgPoolSquad> {
    let manager = ConnectionManager::<PgConnection>::new(&database.url);
    let pool = Pool::builder()
        .max_size(database.max_connections)
        .min_idle(Some(database.min_idle.min(database.max_connections)))
        .max_lifetime(Some(Duration::from_secs(database.max_lifetime)))
        .connection_timeout(Duration::from_secs(database.connection_timeout))
        .test_on_check_out(true)
        .build(manager)?;
    Ok(pool)
}
