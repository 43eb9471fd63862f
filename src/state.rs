//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool, the route guard policy, and the knobs needed
//! to hand each signed-in user their own settings storage context.

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::guard::RouteGuard;
use crate::settings::{FileStorage, SettingsStore};

// =============================================================================
// SETTINGS ROOT
// =============================================================================

/// Where per-user settings live. `dir: None` means no storage context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRoot {
    pub dir: Option<PathBuf>,
    pub quota_bytes: usize,
}

impl SettingsRoot {
    /// Settings store scoped to one user. Each user gets a separate
    /// directory, so the fixed settings key never collides across users.
    #[must_use]
    pub fn store_for(&self, user_id: Uuid) -> SettingsStore {
        match &self.dir {
            Some(dir) => SettingsStore::new(Arc::new(FileStorage::with_quota(
                dir.join(user_id.to_string()),
                self.quota_bytes,
            ))),
            None => SettingsStore::unavailable(),
        }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub guard: Arc<RouteGuard>,
    pub settings: SettingsRoot,
    pub cookie_secure: bool,
    pub session_ttl_hours: i32,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        let guard = RouteGuard::new(
            config.auth_path.clone(),
            config.home_path.clone(),
            config.public_paths.iter().cloned(),
        );
        Self {
            pool,
            guard: Arc::new(guard),
            settings: SettingsRoot { dir: config.settings_dir.clone(), quota_bytes: config.settings_quota_bytes },
            cookie_secure: config.cookie_secure,
            session_ttl_hours: config.session_ttl_hours,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
