use crate::config::Config;
use crate::decision_policy::Outcome;
use crate::device_display::interface::DeviceDisplay;
use crate::render::outcome_text;
use eframe::egui;
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct LabelWindow {
    text: Arc<Mutex<String>>,
    dismissed: Arc<Mutex<bool>>,
}

impl eframe::App for LabelWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dismissed = self.dismissed.lock().map(|d| *d).unwrap_or(true);
        if dismissed {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let text = self
            .text
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);

                let rect = ui.available_rect_before_wrap();
                ui.painter()
                    .rect_filled(rect, 8.0, egui::Color32::from_rgba_unmultiplied(211, 211, 211, 77));

                ui.label(
                    egui::RichText::new(text)
                        .strong()
                        .color(egui::Color32::WHITE)
                        .size(30.0),
                );
            });
        });

        // The label changes from the capture loop, not from input events.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

/// Shows the latest outcome in a small desktop window.
///
/// Building one opens nothing. The window lives in `run_window`, which must be
/// called from the main thread.
pub struct DeviceDisplayGui {
    config: Config,
    text: Arc<Mutex<String>>,
    dismissed: Arc<Mutex<bool>>,
}

impl DeviceDisplayGui {
    pub fn new(config: Config) -> Self {
        let text = Arc::new(Mutex::new(config.placeholder_message.clone()));
        Self {
            config,
            text,
            dismissed: Arc::new(Mutex::new(false)),
        }
    }

    /// Blocks until the window is closed by the user or by `dismiss`.
    pub fn run_window(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let window = LabelWindow {
            text: self.text.clone(),
            dismissed: self.dismissed.clone(),
        };

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([320.0, 200.0])
                .with_resizable(false),
            ..Default::default()
        };

        eframe::run_native("Logo Detector", options, Box::new(|_cc| Box::new(window)))
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn emit(&self, outcome: &Outcome) {
        if let Ok(mut text) = self.text.lock() {
            *text = outcome_text(&self.config, outcome);
        }
    }

    fn dismiss(&self) {
        if let Ok(mut dismissed) = self.dismissed.lock() {
            *dismissed = true;
        }
    }
}
