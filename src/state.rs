/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::MemoryDb;
use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub db: Arc<MemoryDb>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, db: Arc<MemoryDb>) -> Self {
        Self { auth, db }
    }
}
