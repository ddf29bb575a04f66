use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use log::{debug, error};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::communication::{AudioCommand, ClockEvent};

/// start the audio worker. it owns the output stream and at most one sink,
/// looping the alarm sound until told to stop. playback problems are posted
/// back on `events` as non-fatal status material, the worker itself never
/// dies over them.
pub fn spawn(commands: Receiver<AudioCommand>, events: Sender<ClockEvent>) {
    thread::spawn(move || run(&commands, &events));
}

fn run(commands: &Receiver<AudioCommand>, events: &Sender<ClockEvent>) {
    let stream = OutputStreamBuilder::open_default_stream();
    if let Err(err) = &stream {
        error!("couldn't open audio output: {err}");
    }
    let mut sink: Option<Sink> = None;
    while let Ok(command) = commands.recv() {
        match command {
            AudioCommand::PlayLoop(path) => {
                // a new ring replaces whatever was still playing
                if let Some(old) = sink.take() {
                    old.stop();
                }
                match &stream {
                    Ok(stream) => match play_loop(stream, &path) {
                        Ok(playing) => sink = Some(playing),
                        Err(message) => {
                            error!("couldn't play {}: {message}", path.display());
                            let _ = events.send(ClockEvent::AudioError(message));
                        }
                    },
                    Err(err) => {
                        let _ = events.send(ClockEvent::AudioError(err.to_string()));
                    }
                }
            }
            AudioCommand::StopAll => {
                if let Some(playing) = sink.take() {
                    playing.stop();
                }
            }
        }
    }
    debug!("audio worker stopped");
}

/// decode `path` and loop it forever on a fresh sink.
fn play_loop(stream: &OutputStream, path: &Path) -> Result<Sink, String> {
    let file = File::open(path).map_err(|err| format!("{}: {err}", path.display()))?;
    let source = Decoder::new(BufReader::new(file))
        .map_err(|err| err.to_string())?
        .repeat_infinite();
    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.play();
    Ok(sink)
}
