use crate::app_state::AppState;
use crate::errors::MergerResult;
use log::info;
use std::sync::Arc;

/// Exit status conventionally used after SIGINT
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

// Removes scratch directories when the user hits Ctrl+C mid-merge
pub struct SignalHandler {
    app_state: Arc<AppState>,
}

impl SignalHandler {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }

    pub fn setup_handlers(&self) -> MergerResult<()> {
        let app_state = Arc::clone(&self.app_state);

        ctrlc::set_handler(move || {
            info!("Received interrupt signal, cleaning up scratch storage");
            let removed = app_state.cleanup_scratch();
            info!("Removed {} scratch director(y/ies)", removed);
            std::process::exit(INTERRUPTED_EXIT_CODE);
        })?;

        Ok(())
    }
}
