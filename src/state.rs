use std::sync::Arc;

use super::{config::Config, database::Database};

pub struct AppState {
    pub config: Config,
    pub database: Database,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        let config = Config::load();

        let database = Database::open(&config.database_path).expect("Database misconfigured!");

        Arc::new(Self { config, database })
    }
}
