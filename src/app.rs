// src/app.rs
use eframe::egui;
use rfd::FileDialog;
use tracing::info;

use crate::state::{AppState, Screen};

pub struct DashboardApp {
    state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open dataset...").clicked() {
                    self.open_dataset();
                    ui.close_menu();
                }
            });

            ui.separator();

            for screen in [Screen::Coach, Screen::Participant] {
                if ui.selectable_label(self.state.current_screen == screen, screen.label()).clicked() {
                    self.state.current_screen = screen;
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.state.has_data() {
                    ui.label(self.state.dataset.display_date());
                    ui.strong(&self.state.dataset.name);
                }
            });
        });
    }

    fn open_dataset(&mut self) {
        let file_dialog = FileDialog::new()
            .add_filter("Results", &["csv", "ron"])
            .set_title("Open Event Results");

        if let Some(path) = file_dialog.pick_file() {
            info!(path = %path.display(), "Opening dataset");
            if let Err(e) = self.state.open_dataset(&path) {
                self.state.error_message = Some(format!("Error loading dataset: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.state.has_data() {
                ui.centered_and_justified(|ui| {
                    ui.label("Open a results file (File > Open dataset...) to get started");
                });
                return;
            }

            match self.state.current_screen {
                Screen::Coach => {
                    crate::ui::coach::show_coach_view(ui, &self.state);
                }
                Screen::Participant => {
                    crate::ui::participant::show_participant_view(ui, &mut self.state);
                }
            }
        });

        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }
    }
}
