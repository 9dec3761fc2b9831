use std::sync::Arc;

use sqlx::PgPool;

use expense_tracker_config::{CorsConfig, JwtConfig};

use crate::modules::auth::{PgUserRepository, UserRepository};
use crate::modules::categories::{CategoryRepository, PgCategoryRepository};
use crate::modules::expenses::{ExpenseRepository, PgExpenseRepository};

/// Shared handler state. Repositories sit behind trait objects so the same
/// router runs against PostgreSQL or the in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub expenses: Arc<dyn ExpenseRepository>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn from_pool(pool: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            expenses: Arc::new(PgExpenseRepository::new(pool)),
            jwt_config,
            cors_config,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &"<redacted>")
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}
