use std::sync::Arc;

use crate::config::Config;
use crate::store::SheetStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn SheetStore>,
}
