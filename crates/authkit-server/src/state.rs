use std::sync::Arc;

use authkit_shared::config::AppConfig;

use crate::context::AppContext;

#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
    pub config: AppConfig,
}
