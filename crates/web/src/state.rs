use std::sync::Arc;

use storage::ProfileStore;

use crate::error::ErrorMode;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProfileStore>,
    pub errors: ErrorMode,
}
