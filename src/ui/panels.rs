use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows × {} columns, {} visible",
                ds.len(),
                ds.columns.len(),
                state.visible_rows.len()
            ));
        } else {
            ui.label("Upload a CSV file to begin");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Tab strip
// ---------------------------------------------------------------------------

/// Render the Overview / Charts / Filters / Story tab selector.
pub fn tab_strip(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }
    });
}

// ---------------------------------------------------------------------------
// Status labels (info / success / warning / error)
// ---------------------------------------------------------------------------

pub fn info_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(Color32::LIGHT_BLUE));
}

pub fn success_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(Color32::LIGHT_GREEN));
}

pub fn warning_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(Color32::YELLOW));
}

pub fn error_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(Color32::LIGHT_RED));
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows, {} numeric / {} categorical columns",
                    dataset.len(),
                    dataset.numeric_columns().len(),
                    dataset.categorical_columns().len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
