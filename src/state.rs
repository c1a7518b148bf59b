use std::sync::Arc;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::repository::{DbState, MemberRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub members: MemberRepository,
    pub sessions: SessionStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, db: &DbState) -> Self {
        Self {
            members: MemberRepository::new(db.connection()),
            sessions: SessionStore::new(config.session_ttl),
            config: Arc::new(config),
        }
    }
}
