use std::sync::Arc;
use std::time::Duration;
use chrono::{NaiveDate, Timelike, Utc};
use chrono_tz::Asia::Phnom_Penh;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::state::AppState;

/// Local gym hour at which the daily reminder sweep fires.
const SWEEP_HOUR: u32 = 9;

pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting background reminder worker...");

    let mut last_run: Option<NaiveDate> = None;

    loop {
        let local_now = Utc::now().with_timezone(&Phnom_Penh);
        let today = local_now.date_naive();

        if local_now.hour() == SWEEP_HOUR && last_run != Some(today) {
            let span = info_span!("reminder_sweep", date = %today);

            let state = state.clone();
            async move {
                match state.reminder_service.run_sweep(Utc::now()).await {
                    Ok(count) => info!("Daily reminder sweep sent {} email(s)", count),
                    Err(e) => error!("Daily reminder sweep failed: {:?}", e),
                }
            }
                .instrument(span)
                .await;

            last_run = Some(today);
        }

        sleep(Duration::from_secs(300)).await;
    }
}
