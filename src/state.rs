use crate::config::Config;
use crate::db::Database;

/// Shared, read-only handles passed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        Self { db, config }
    }
}
