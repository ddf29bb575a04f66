use std::fmt;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

use crate::error::AlarmError;

/// a single scheduled wall-clock timestamp, truncated to whole seconds.
/// an alarm carries no label or repeat rule, it is consumed the moment
/// it fires or removed by hand before that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alarm(NaiveDateTime);

impl Alarm {
    /// wrap a timestamp, dropping any sub-second component.
    #[must_use]
    pub fn new(when: NaiveDateTime) -> Self {
        Self(when.with_nanosecond(0).unwrap_or(when))
    }

    /// the next moment the given time of day comes around relative to `now`:
    /// today if it is still ahead, otherwise tomorrow.
    pub fn next_occurrence(
        hour: u32,
        minute: u32,
        second: u32,
        now: NaiveDateTime,
    ) -> Result<Self, AlarmError> {
        let time =
            NaiveTime::from_hms_opt(hour, minute, second).ok_or(AlarmError::InvalidTime)?;
        let now = now.with_nanosecond(0).unwrap_or(now);
        let mut when = now.date().and_time(time);
        // already passed (or is this very second), so schedule for tomorrow
        if when <= now {
            when += Duration::days(1);
        }
        Ok(Self(when))
    }

    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.0
    }

    /// just the time of day, the form status messages use.
    #[must_use]
    pub fn clock_time(&self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// the pending alarms, kept sorted ascending and free of duplicate
/// timestamps. shared between the ui thread and the poller behind a mutex.
#[derive(Debug, Default)]
pub struct AlarmRegistry {
    alarms: Vec<Alarm>,
}

impl AlarmRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// schedule `alarm`, rejecting a timestamp that is already present.
    pub fn add(&mut self, alarm: Alarm) -> Result<(), AlarmError> {
        match self.alarms.binary_search(&alarm) {
            Ok(_) => Err(AlarmError::DuplicateAlarm),
            Err(pos) => {
                self.alarms.insert(pos, alarm);
                Ok(())
            }
        }
    }

    /// set-style insert used by snooze: a timestamp that is somehow already
    /// scheduled is left alone instead of being rejected.
    pub fn insert(&mut self, alarm: Alarm) {
        if let Err(pos) = self.alarms.binary_search(&alarm) {
            self.alarms.insert(pos, alarm);
        }
    }

    /// remove the alarm at `index` of the chronological view.
    pub fn remove_at(&mut self, index: usize) -> Result<Alarm, AlarmError> {
        if index < self.alarms.len() {
            Ok(self.alarms.remove(index))
        } else {
            Err(AlarmError::InvalidSelection)
        }
    }

    /// consume the alarm matching `now` exactly, if any. the match is
    /// equality on the whole second, never `>=`: a tick that lands late
    /// skips the alarm rather than firing it late, and a skipped alarm
    /// stays in the list until the user removes it.
    pub fn take_due(&mut self, now: NaiveDateTime) -> Option<Alarm> {
        let now = now.with_nanosecond(0).unwrap_or(now);
        let index = self.alarms.iter().position(|alarm| alarm.timestamp() == now)?;
        Some(self.alarms.remove(index))
    }

    /// the current chronological sequence, for display.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Alarm> {
        self.alarms.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }
}
