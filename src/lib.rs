#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

use std::fmt::Write as _;
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use eframe::egui::{
    self, Button, CentralPanel, Color32, ComboBox, DragValue, Layout, RichText, ScrollArea,
    TopBottomPanel, Window,
};
use log::error;

use crate::{
    clock::AlarmClock,
    communication::{ClockEvent, Severity, Status},
    config::{Config, Theme},
};

pub mod alarm;
pub mod audio;
pub mod clock;
pub mod communication;
pub mod config;
pub mod error;
pub mod poller;
pub mod ringer;

/// the egui front end: current time up top, the hour/minute/second form,
/// the chronological alarm list, and the status line. everything it does
/// goes through [`AlarmClock`], fired alarms come back in over `events`.
pub struct ClockApp {
    config: Config,
    clock: AlarmClock,
    events: Receiver<ClockEvent>,
    hour: u32,
    minute: u32,
    second: u32,
    selected: Option<usize>,
    status: Option<Status>,
    in_config: bool,
}

impl ClockApp {
    #[must_use]
    pub fn new(config: Config, clock: AlarmClock, events: Receiver<ClockEvent>) -> Self {
        Self {
            config,
            clock,
            events,
            hour: 0,
            minute: 0,
            second: 0,
            selected: None,
            status: None,
            in_config: false,
        }
    }

    /// pull everything the workers posted since the last frame, so ringing
    /// state only ever changes on this thread.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            let status = self.clock.handle_event(event, &self.config.alarm_sound);
            self.status = Some(status);
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("time_and_ctrl").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let theme_btn = ui.add(Button::new({
                    if self.config.theme == Theme::Dark {
                        "🌞"
                    } else {
                        "🌙"
                    }
                }));
                if theme_btn.clicked() {
                    self.config.theme = !self.config.theme;
                }
                ui.centered_and_justified(|ui| {
                    ui.label(format!(
                        "Current Time: {}",
                        format_time(Local::now().naive_local(), &self.config.time_format)
                    ));
                });
                ui.with_layout(Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("⚙").on_hover_text("settings").clicked() {
                        self.in_config = true;
                    }
                });
            });
        });
    }

    fn render_settings(&mut self, ctx: &egui::Context) {
        Window::new("settings ⚙").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("time format");
                ui.text_edit_singleline(&mut self.config.time_format);
            });
            ui.horizontal(|ui| {
                ui.label("snooze minutes");
                ui.add(DragValue::new(&mut self.config.snooze_minutes).range(1..=120));
            });
            ui.horizontal(|ui| {
                ui.label(format!(
                    "alarm sound: {}",
                    self.config.alarm_sound.display()
                ));
                if ui.button("pick").clicked() {
                    self.pick_alarm_sound();
                }
            });
            if ui.button("x").clicked() {
                self.in_config = false;
                if let Err(err) = self.config.save(&Config::config_path()) {
                    error!("couldn't save config: {err}");
                }
            }
        });
    }

    fn pick_alarm_sound(&mut self) {
        let file_dialog = rfd::FileDialog::new().set_title("Pick alarm sound");
        let file_dialog = match directories::UserDirs::new()
            .and_then(|dirs| dirs.audio_dir().map(Path::to_path_buf))
        {
            Some(audio_path) => file_dialog.set_directory(audio_path),
            None => file_dialog,
        };
        if let Some(path) = file_dialog.pick_file() {
            self.config.alarm_sound = path;
        }
    }

    fn render_alarm_form(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Set Time:");
            ComboBox::from_id_salt("hour")
                .width(55.0)
                .selected_text(format!("{:02}", self.hour))
                .show_ui(ui, |ui| {
                    for hour in 0..24 {
                        ui.selectable_value(&mut self.hour, hour, format!("{hour:02}"));
                    }
                });
            ComboBox::from_id_salt("minute")
                .width(55.0)
                .selected_text(format!("{:02}", self.minute))
                .show_ui(ui, |ui| {
                    for minute in 0..60 {
                        ui.selectable_value(&mut self.minute, minute, format!("{minute:02}"));
                    }
                });
            ComboBox::from_id_salt("second")
                .width(55.0)
                .selected_text(format!("{:02}", self.second))
                .show_ui(ui, |ui| {
                    for second in 0..60 {
                        ui.selectable_value(&mut self.second, second, format!("{second:02}"));
                    }
                });
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Add Alarm").clicked() {
                let status = self.clock.add_alarm(self.hour, self.minute, self.second);
                self.status = Some(status);
            }
            if ui.button("Remove Selected Alarm").clicked() {
                let status = self.clock.remove_alarm(self.selected);
                self.selected = None;
                self.status = Some(status);
            }
            if ui.button("Stop Alarm").clicked() {
                self.status = Some(self.clock.stop_ringing());
            }
            if ui
                .button(format!("Snooze {} min", self.config.snooze_minutes))
                .clicked()
            {
                self.status = Some(self.clock.snooze_ringing(self.config.snooze_minutes));
            }
        });
    }

    fn render_alarm_list(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Your Alarms:").strong());
        let alarms = self.clock.alarms();
        // the poller may have consumed the selected alarm since last frame
        if self.selected.is_some_and(|index| index >= alarms.len()) {
            self.selected = None;
        }
        ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
            for (index, alarm) in alarms.iter().enumerate() {
                let selected = self.selected == Some(index);
                if ui.selectable_label(selected, alarm.to_string()).clicked() {
                    self.selected = if selected { None } else { Some(index) };
                }
            }
        });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(status) = &self.status {
            let color = status_color(status.severity, ui);
            ui.label(RichText::new(status.message.as_str()).color(color));
        }
    }

    fn render_ringing(&mut self, ctx: &egui::Context) {
        if let Some(alarm) = self.clock.ringing() {
            Window::new("Alarm Triggered").auto_sized().show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("⏰ Alarm ringing: {}", alarm.clock_time()))
                        .color(Color32::RED),
                );
                ui.horizontal(|ui| {
                    if ui.button("stop").clicked() {
                        self.status = Some(self.clock.stop_ringing());
                    }
                    if ui
                        .button(format!("snooze {} min", self.config.snooze_minutes))
                        .clicked()
                    {
                        self.status = Some(self.clock.snooze_ringing(self.config.snooze_minutes));
                    }
                });
            });
        }
    }
}

impl eframe::App for ClockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // keep the clock label and the event drain moving even when the
        // user isn't interacting
        ctx.request_repaint_after(Duration::from_millis(250));
        self.drain_events();

        ctx.set_visuals(self.config.theme.into());
        if self.in_config {
            self.render_settings(ctx);
        }
        self.render_ringing(ctx);
        self.render_header(ctx);
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new("Smart Multi-Alarm Clock").color(Color32::RED));
            });
            self.render_alarm_form(ui);
            self.render_actions(ui);
            ui.separator();
            self.render_alarm_list(ui);
            ui.separator();
            self.render_status(ui);
        });
    }
}

fn status_color(severity: Severity, ui: &egui::Ui) -> Color32 {
    match severity {
        Severity::Info => ui.visuals().text_color(),
        Severity::Success => Color32::GREEN,
        Severity::Warning => Color32::ORANGE,
        Severity::Error => Color32::RED,
    }
}

/// render `now` with the user's format string. while the format is being
/// edited in the settings window it can be momentarily invalid, in which
/// case the default layout is shown instead of erroring out.
fn format_time(now: NaiveDateTime, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_ok() {
        out
    } else {
        now.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
