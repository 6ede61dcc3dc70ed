// ABOUTME: Shared application state handed to every handler
// ABOUTME: Holds the pool, the storage layers and the token service

use std::sync::Arc;

use sqlx::SqlitePool;

use drinkwise_drinks::DrinkStorage;
use drinkwise_security::{TokenService, UserStorage};
use drinkwise_windows::WindowStorage;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub users: Arc<UserStorage>,
    pub windows: Arc<WindowStorage>,
    pub drinks: Arc<DrinkStorage>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(pool: SqlitePool, tokens: TokenService) -> Self {
        Self {
            users: Arc::new(UserStorage::new(pool.clone())),
            windows: Arc::new(WindowStorage::new(pool.clone())),
            drinks: Arc::new(DrinkStorage::new(pool.clone())),
            pool,
            tokens,
        }
    }
}
