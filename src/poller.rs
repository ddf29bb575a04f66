use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use parking_lot::Mutex;

use crate::{alarm::AlarmRegistry, communication::ClockEvent};

/// matches the one second resolution of the alarms themselves.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// start the background scan over `registry`, pushing fired alarms onto
/// `events`. the thread is daemon-style: it is never joined and stops on
/// its own once the event receiver is gone.
pub fn spawn(registry: Arc<Mutex<AlarmRegistry>>, events: Sender<ClockEvent>) {
    thread::spawn(move || {
        debug!("alarm poller started");
        loop {
            thread::sleep(POLL_INTERVAL);
            let now = Local::now().naive_local();
            if !poll_once(&registry, &events, now) {
                break;
            }
        }
        debug!("alarm poller stopped");
    });
}

/// one tick of the poller: consume at most one alarm matching `now` on the
/// whole second and report it. a tick that skips a second skips the alarm,
/// there is no catch-up firing. returns false once the event channel is
/// closed.
pub fn poll_once(
    registry: &Mutex<AlarmRegistry>,
    events: &Sender<ClockEvent>,
    now: NaiveDateTime,
) -> bool {
    // take the alarm under the lock, send after it is released
    let due = registry.lock().take_due(now);
    match due {
        Some(alarm) => {
            info!("alarm fired: {alarm}");
            events.send(ClockEvent::Fired(alarm)).is_ok()
        }
        None => true,
    }
}
