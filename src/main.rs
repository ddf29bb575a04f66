use std::{error::Error, fs, sync::mpsc};

use clap::{command, Parser, Subcommand};
use eframe::{
    egui::{vec2, ViewportBuilder},
    run_native,
};
use wakey_clock::{audio, clock::AlarmClock, config::Config, poller, ClockApp};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
}
#[derive(Subcommand)]
enum Command {
    /// write the default config and the bundled alarm sound
    Init {
        #[clap(long, short)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // initilize the logger
    simple_file_logger::init_logger!("wakey_clock").expect("couldn't initialize logger");

    let args = Args::parse();
    match args.command {
        Some(Command::Init { force }) => {
            if force || !Config::is_config_present() {
                init_app_files()?;
            }
        }
        None => {
            // first run, set the app files up so the default alarm sound
            // actually exists on disk
            if !Config::is_config_present() {
                init_app_files()?;
            }
        }
    }

    let (audio_tx, audio_rx) = mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel();
    audio::spawn(audio_rx, event_tx.clone());
    let clock = AlarmClock::new(audio_tx);
    poller::spawn(clock.registry(), event_tx);
    let config = Config::load(&Config::config_path());

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder {
            inner_size: Some(vec2(520.0, 430.0)),
            ..Default::default()
        },
        ..Default::default()
    };
    // run the gui
    run_native(
        "Wakey Clock",
        native_options,
        Box::new(|_| Ok(Box::new(ClockApp::new(config, clock, event_rx)))),
    )
    .map_err(|e| e.into())
}

fn init_app_files() -> std::io::Result<()> {
    Config::new().save(&Config::config_path())?;
    fs::create_dir_all(Config::sounds_path())?;
    fs::write(
        Config::sounds_path().join("sound.wav"),
        include_bytes!("../assets/sound.wav"),
    )
}
