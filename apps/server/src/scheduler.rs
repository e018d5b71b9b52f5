//! Background scheduler for the watering reminder sweep.
//!
//! Fires at least once per minute; the sweep's per-user day gate keeps
//! double and overlapping runs harmless.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use crate::main_lib::AppState;

const SWEEP_INTERVAL_SECS: u64 = 60;

/// Initial delay before the first sweep, to let the server fully start.
const INITIAL_DELAY_SECS: u64 = 10;

pub fn start_reminder_scheduler(state: Arc<AppState>) {
    tokio::spawn(async move {
        info!("Reminder scheduler started (60-second interval)");

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;
        let mut sweep_interval = interval(Duration::from_secs(SWEEP_INTERVAL_SECS));

        loop {
            sweep_interval.tick().await;
            // One failed sweep must not stop the scheduler.
            match state.notification_service.run_reminder_sweep().await {
                Ok(0) => debug!("Reminder sweep: nothing to send"),
                Ok(sent) => info!("Reminder sweep delivered {sent} reminder(s)"),
                Err(e) => warn!("Reminder sweep failed: {e}"),
            }
        }
    });
}
