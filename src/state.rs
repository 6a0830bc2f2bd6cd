use std::sync::Arc;

use crate::{config::AppConfig, db::DbConn};

#[derive(Clone)]
pub struct AppState {
    pub orm: DbConn,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(orm: DbConn, config: AppConfig) -> Self {
        Self {
            orm,
            config: Arc::new(config),
        }
    }
}
