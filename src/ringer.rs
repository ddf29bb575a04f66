use std::path::Path;
use std::sync::mpsc::Sender;

use log::{info, warn};

use crate::{alarm::Alarm, communication::AudioCommand, error::AlarmError};

/// tracks which alarm is currently ringing, at most one at a time, and
/// drives the audio worker accordingly. owned by the ui thread, so every
/// transition happens there.
pub struct Ringer {
    current: Option<Alarm>,
    audio: Sender<AudioCommand>,
}

impl Ringer {
    #[must_use]
    pub const fn new(audio: Sender<AudioCommand>) -> Self {
        Self {
            current: None,
            audio,
        }
    }

    /// start ringing `alarm`, looping `sound` until stopped or snoozed.
    pub fn start(&mut self, alarm: Alarm, sound: &Path) {
        if let Some(previous) = self.current.replace(alarm) {
            // can't happen while the registry stays deduplicated, but if it
            // does the newest alarm wins
            warn!("alarm {previous} replaced by {alarm} while still ringing");
        }
        info!("alarm ringing: {alarm}");
        self.command(AudioCommand::PlayLoop(sound.to_path_buf()));
    }

    /// silence the ring and go back to idle, reporting which alarm it was.
    pub fn stop(&mut self) -> Result<Alarm, AlarmError> {
        let alarm = self.current.take().ok_or(AlarmError::NothingRinging)?;
        self.command(AudioCommand::StopAll);
        info!("alarm stopped: {alarm}");
        Ok(alarm)
    }

    #[must_use]
    pub const fn current(&self) -> Option<Alarm> {
        self.current
    }

    fn command(&self, command: AudioCommand) {
        // a closed channel means the audio worker is gone and the process
        // is already shutting down
        let _ = self.audio.send(command);
    }
}
