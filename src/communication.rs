use std::path::PathBuf;

use crate::{alarm::Alarm, error::AlarmError};

/// what the background workers report back to the ui thread. fired alarms
/// travel this way so all ringing-state changes happen on the ui thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    /// the poller matched this alarm and already removed it from the registry
    Fired(Alarm),
    /// the audio worker couldn't start or keep playback going
    AudioError(String),
}

/// what the ui thread asks of the audio worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCommand {
    /// play the sound file on a loop until told otherwise
    PlayLoop(PathBuf),
    /// stop and purge whatever is playing
    StopAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// human readable feedback after an operation, rendered as the colored
/// status line under the alarm list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub severity: Severity,
}

impl Status {
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

impl From<AlarmError> for Status {
    /// every recoverable failure shows up as an orange warning line.
    fn from(err: AlarmError) -> Self {
        Self::warning(err.to_string())
    }
}
