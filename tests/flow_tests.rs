//! The whole alarm lifecycle over the public API: alarms go into the
//! registry, a simulated poller tick fires them, the clock rings, and stop
//! or snooze settles everything again. The audio side is observed through
//! the command channel instead of a real output device.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{NaiveDate, NaiveDateTime};
use wakey_clock::{
    alarm::Alarm,
    clock::AlarmClock,
    communication::{AudioCommand, ClockEvent, Severity},
    poller,
};

fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 14)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

fn sound() -> PathBuf {
    PathBuf::from("beep.wav")
}

struct Harness {
    clock: AlarmClock,
    audio: Receiver<AudioCommand>,
    event_tx: Sender<ClockEvent>,
    events: Receiver<ClockEvent>,
}

fn harness() -> Harness {
    let (audio_tx, audio_rx) = mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel();
    Harness {
        clock: AlarmClock::new(audio_tx),
        audio: audio_rx,
        event_tx,
        events: event_rx,
    }
}

#[test]
fn alarm_lifecycle_fire_and_stop() {
    let mut h = harness();
    let registry = h.clock.registry();

    let status = h.clock.add_alarm_at(9, 30, 0, at(8, 0, 0));
    assert_eq!(status.severity, Severity::Success);
    assert_eq!(status.message, "Alarm set for 2024-05-14 09:30:00");

    // the second before the alarm is quiet
    assert!(poller::poll_once(&registry, &h.event_tx, at(9, 29, 59)));
    assert!(h.events.try_recv().is_err());

    // the matching second fires exactly one event and consumes the alarm
    assert!(poller::poll_once(&registry, &h.event_tx, at(9, 30, 0)));
    let event = h.events.try_recv().unwrap();
    assert_eq!(event, ClockEvent::Fired(Alarm::new(at(9, 30, 0))));
    assert!(h.events.try_recv().is_err());

    let status = h.clock.handle_event(event, &sound());
    assert_eq!(status.severity, Severity::Error);
    assert_eq!(status.message, "⏰ Alarm ringing: 09:30:00");
    assert_eq!(h.audio.try_recv(), Ok(AudioCommand::PlayLoop(sound())));
    assert_eq!(h.clock.ringing(), Some(Alarm::new(at(9, 30, 0))));
    assert!(h.clock.alarms().is_empty());

    let status = h.clock.stop_ringing();
    assert_eq!(status.severity, Severity::Info);
    assert_eq!(status.message, "Alarm at 09:30:00 stopped");
    assert_eq!(h.audio.try_recv(), Ok(AudioCommand::StopAll));
    assert_eq!(h.clock.ringing(), None);
}

#[test]
fn snooze_reschedules_from_the_current_instant() {
    let mut h = harness();
    let registry = h.clock.registry();

    h.clock.add_alarm_at(9, 0, 0, at(8, 0, 0));
    assert!(poller::poll_once(&registry, &h.event_tx, at(9, 0, 0)));
    let event = h.events.try_recv().unwrap();
    h.clock.handle_event(event, &sound());
    let _ = h.audio.try_recv();

    // user reaches snooze three seconds into the ringing
    let status = h.clock.snooze_ringing_at(5, at(9, 0, 3));
    assert_eq!(status.severity, Severity::Success);
    assert_eq!(status.message, "Snoozed for 5 minutes (next at 09:05:03)");
    assert_eq!(h.audio.try_recv(), Ok(AudioCommand::StopAll));
    assert_eq!(h.clock.ringing(), None);
    assert_eq!(h.clock.alarms(), vec![Alarm::new(at(9, 5, 3))]);

    // and the snoozed alarm fires like any other
    assert!(poller::poll_once(&registry, &h.event_tx, at(9, 5, 3)));
    assert_eq!(
        h.events.try_recv(),
        Ok(ClockEvent::Fired(Alarm::new(at(9, 5, 3))))
    );
}

#[test]
fn missed_second_never_fires() {
    let mut h = harness();
    let registry = h.clock.registry();

    h.clock.add_alarm_at(9, 30, 0, at(8, 0, 0));
    // the poller slept through 09:30:00, its next tick lands two seconds late
    assert!(poller::poll_once(&registry, &h.event_tx, at(9, 30, 2)));
    assert!(h.events.try_recv().is_err());
    // the alarm stays listed and nothing rings
    assert_eq!(h.clock.alarms(), vec![Alarm::new(at(9, 30, 0))]);
    assert_eq!(h.clock.ringing(), None);
}

#[test]
fn consecutive_ticks_fire_alarms_in_order() {
    let mut h = harness();
    let registry = h.clock.registry();

    h.clock.add_alarm_at(9, 30, 1, at(8, 0, 0));
    h.clock.add_alarm_at(9, 30, 0, at(8, 0, 0));

    assert!(poller::poll_once(&registry, &h.event_tx, at(9, 30, 0)));
    assert!(poller::poll_once(&registry, &h.event_tx, at(9, 30, 1)));
    assert_eq!(
        h.events.try_recv(),
        Ok(ClockEvent::Fired(Alarm::new(at(9, 30, 0))))
    );
    assert_eq!(
        h.events.try_recv(),
        Ok(ClockEvent::Fired(Alarm::new(at(9, 30, 1))))
    );
    assert!(h.clock.alarms().is_empty());
}

#[test]
fn duplicate_add_keeps_a_single_alarm() {
    let mut h = harness();
    let now = at(8, 0, 0);

    let status = h.clock.add_alarm_at(9, 30, 0, now);
    assert_eq!(status.severity, Severity::Success);
    let status = h.clock.add_alarm_at(9, 30, 0, now);
    assert_eq!(status.severity, Severity::Warning);
    assert_eq!(status.message, "Alarm already exists!");
    assert_eq!(h.clock.alarms().len(), 1);
}

#[test]
fn stop_without_ringing_reports_and_stays_quiet() {
    let mut h = harness();

    let status = h.clock.stop_ringing();
    assert_eq!(status.severity, Severity::Warning);
    assert_eq!(status.message, "No alarm ringing");
    // no stop command goes out when nothing ever played
    assert!(h.audio.try_recv().is_err());
}

#[test]
fn alarm_firing_over_an_active_ring_takes_over() {
    let mut h = harness();

    h.clock
        .handle_event(ClockEvent::Fired(Alarm::new(at(9, 0, 0))), &sound());
    let _ = h.audio.try_recv();

    let status = h
        .clock
        .handle_event(ClockEvent::Fired(Alarm::new(at(9, 0, 30))), &sound());
    assert_eq!(status.message, "⏰ Alarm ringing: 09:00:30");
    assert_eq!(h.clock.ringing(), Some(Alarm::new(at(9, 0, 30))));
    // the repeated play command restarts the loop for the new alarm
    assert_eq!(h.audio.try_recv(), Ok(AudioCommand::PlayLoop(sound())));

    let status = h.clock.stop_ringing();
    assert_eq!(status.message, "Alarm at 09:00:30 stopped");
}
