//! Shared application state.

use rusqlite::Connection;

use crate::config::Settings;
use crate::db::{self, DatabaseError};

/// State shared by all request handlers, wrapped in `Arc` at startup.
///
/// There is no in-process cache of entities: all state lives in the
/// store, and each request opens its own scoped connection via
/// [`AppState::open_db`], released on drop whether the request succeeds
/// or fails.
pub struct AppState {
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Open a connection to the intake database. Migrations run once at
    /// startup, not here.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_connection(&self.settings.database_path)
    }
}
