use std::sync::Arc;

use bloglist_common::store::BlogStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::store::SeaOrmBlogStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub blogs: Arc<dyn BlogStore>,
}

impl AppState {
    /// State backed by `db` for both users and blogs.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            blogs: Arc::new(SeaOrmBlogStore::new(db.clone())),
            db,
            config,
        }
    }
}
