use std::path::Path;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use chrono::{Duration, Local, NaiveDateTime};
use log::info;
use parking_lot::Mutex;

use crate::{
    alarm::{Alarm, AlarmRegistry},
    communication::{AudioCommand, ClockEvent, Status},
    error::AlarmError,
    ringer::Ringer,
};

/// the state both actors work against: the registry shared with the poller
/// thread, and the ringing controller confined to the ui thread. every
/// mutating operation answers with a [`Status`] for the status line, and
/// failures are checked before anything is touched.
pub struct AlarmClock {
    registry: Arc<Mutex<AlarmRegistry>>,
    ringer: Ringer,
}

impl AlarmClock {
    #[must_use]
    pub fn new(audio: Sender<AudioCommand>) -> Self {
        Self {
            registry: Arc::new(Mutex::new(AlarmRegistry::new())),
            ringer: Ringer::new(audio),
        }
    }

    /// handle to the registry for the poller thread.
    #[must_use]
    pub fn registry(&self) -> Arc<Mutex<AlarmRegistry>> {
        Arc::clone(&self.registry)
    }

    /// schedule the next occurrence of the given time of day.
    pub fn add_alarm(&mut self, hour: u32, minute: u32, second: u32) -> Status {
        self.add_alarm_at(hour, minute, second, local_now())
    }

    /// [`Self::add_alarm`] with an explicit current instant.
    pub fn add_alarm_at(
        &mut self,
        hour: u32,
        minute: u32,
        second: u32,
        now: NaiveDateTime,
    ) -> Status {
        let alarm = match Alarm::next_occurrence(hour, minute, second, now) {
            Ok(alarm) => alarm,
            Err(err) => return err.into(),
        };
        match self.registry.lock().add(alarm) {
            Ok(()) => {
                info!("alarm set for {alarm}");
                Status::success(format!("Alarm set for {alarm}"))
            }
            Err(err) => err.into(),
        }
    }

    /// remove the alarm at `selection` of the chronological list.
    pub fn remove_alarm(&mut self, selection: Option<usize>) -> Status {
        let Some(index) = selection else {
            return AlarmError::NoSelection.into();
        };
        match self.registry.lock().remove_at(index) {
            Ok(alarm) => {
                info!("removed alarm {alarm}");
                Status::info(format!("Removed alarm: {alarm}"))
            }
            Err(err) => err.into(),
        }
    }

    /// silence the currently ringing alarm.
    pub fn stop_ringing(&mut self) -> Status {
        match self.ringer.stop() {
            Ok(alarm) => Status::info(format!("Alarm at {} stopped", alarm.clock_time())),
            Err(err) => err.into(),
        }
    }

    /// silence the ring and reschedule it `minutes` from now.
    pub fn snooze_ringing(&mut self, minutes: i64) -> Status {
        self.snooze_ringing_at(minutes, local_now())
    }

    /// [`Self::snooze_ringing`] with an explicit current instant.
    pub fn snooze_ringing_at(&mut self, minutes: i64, now: NaiveDateTime) -> Status {
        if self.ringer.stop().is_err() {
            return Status::warning("No alarm ringing to snooze");
        }
        // a fresh future timestamp, no need for the roll-forward logic of
        // add_alarm; insert keeps the registry deduplicated all the same
        let next = Alarm::new(now + Duration::minutes(minutes));
        self.registry.lock().insert(next);
        info!("snoozed for {minutes} minutes, next at {next}");
        Status::success(format!(
            "Snoozed for {minutes} minutes (next at {})",
            next.clock_time()
        ))
    }

    /// an alarm the poller matched, handed over to the ringing controller.
    pub fn alarm_fired(&mut self, alarm: Alarm, sound: &Path) -> Status {
        self.ringer.start(alarm, sound);
        Status::error(format!("⏰ Alarm ringing: {}", alarm.clock_time()))
    }

    /// turn one event from the background workers into a status line.
    pub fn handle_event(&mut self, event: ClockEvent, sound: &Path) -> Status {
        match event {
            ClockEvent::Fired(alarm) => self.alarm_fired(alarm, sound),
            ClockEvent::AudioError(message) => AlarmError::AudioPlayback(message).into(),
        }
    }

    /// the pending alarms in chronological order.
    #[must_use]
    pub fn alarms(&self) -> Vec<Alarm> {
        self.registry.lock().snapshot()
    }

    /// the alarm currently ringing, if any.
    #[must_use]
    pub fn ringing(&self) -> Option<Alarm> {
        self.ringer.current()
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
