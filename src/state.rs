use std::sync::Arc;

use crate::pinterest::PinSource;
use crate::store::PinStore;

/// Shared application state passed to all handlers.
/// Both collaborators are opened once at startup and injected here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PinStore>,
    pub pins: Arc<dyn PinSource>,
}
