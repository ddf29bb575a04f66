use thiserror::Error;

/// everything that can go wrong from a user action or a poller tick.
/// all of these are recovered on the spot and shown on the status line,
/// none of them take the process down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlarmError {
    /// the hour/minute/second combination is not a valid time of day
    #[error("Invalid time selected")]
    InvalidTime,
    /// that exact timestamp is already scheduled
    #[error("Alarm already exists!")]
    DuplicateAlarm,
    /// remove was asked for with nothing selected
    #[error("No alarm selected")]
    NoSelection,
    /// remove was asked for with a selection the list no longer has
    #[error("Invalid selection")]
    InvalidSelection,
    /// stop/snooze with no alarm ringing
    #[error("No alarm ringing")]
    NothingRinging,
    /// the platform sound facility couldn't play the alarm sound
    #[error("Error playing sound: {0}")]
    AudioPlayback(String),
}
