// src/ui/mod.rs
use eframe::egui;

pub mod coach;
pub mod participant;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(100, 150, 255);
pub const MALE_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 140, 230);
pub const FEMALE_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 110, 160);
pub const HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(230, 80, 80);
pub const MUTED: egui::Color32 = egui::Color32::GRAY;

pub const CHART_HEIGHT: f32 = 200.0;

/// Shown instead of a chart when there is nothing to draw.
pub fn placeholder(ui: &mut egui::Ui, message: &str) {
    ui.group(|ui| {
        ui.set_min_height(60.0);
        ui.centered_and_justified(|ui| {
            ui.weak(message);
        });
    });
}

/// Captions for category bars, since the plot axis only shows indices.
pub fn bar_captions<'a>(ui: &mut egui::Ui, labels: impl IntoIterator<Item = (usize, &'a str)>) {
    ui.horizontal_wrapped(|ui| {
        for (index, label) in labels {
            ui.small(format!("{}: {}", index, label));
        }
    });
}

pub fn big_number(text: impl Into<String>) -> egui::RichText {
    egui::RichText::new(text).size(28.0).strong()
}
