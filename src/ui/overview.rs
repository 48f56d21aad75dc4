use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::panels;

/// Number of sample rows shown in the Overview head table.
const HEAD_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Overview tab
// ---------------------------------------------------------------------------

/// Row/column counts and the first rows of the unfiltered dataset.
pub fn show(ui: &mut Ui, state: &AppState) {
    ui.heading("Data Overview");

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.  (File → Open CSV…)");
            return;
        }
    };

    ui.label(format!(
        "Rows: {} | Columns: {}",
        dataset.len(),
        dataset.columns.len()
    ));
    panels::success_label(
        ui,
        &format!("Filtered rows: {}", state.visible_rows.len()),
    );
    ui.add_space(8.0);

    if dataset.is_empty() {
        ui.label("The file has no data rows.");
        return;
    }

    let head: Vec<usize> = (0..dataset.len().min(HEAD_ROWS)).collect();
    rows_table(ui, dataset, &head, "overview_head");
}

// ---------------------------------------------------------------------------
// Shared row table
// ---------------------------------------------------------------------------

/// Render the given rows of a dataset as a striped table with class-annotated
/// column headers. Also used by the story's conflict scene.
pub fn rows_table(ui: &mut Ui, dataset: &Dataset, rows: &[usize], id_salt: &str) {
    if dataset.columns.is_empty() {
        ui.label("The file has no columns.");
        return;
    }

    ui.push_id(id_salt, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(TableColumn::auto().at_least(80.0), dataset.columns.len())
            .header(20.0, |mut header| {
                for col in &dataset.columns {
                    header.col(|ui| {
                        ui.vertical(|ui: &mut Ui| {
                            ui.strong(&col.name);
                            ui.label(RichText::new(col.class.label()).small().weak());
                        });
                    });
                }
            })
            .body(|mut body| {
                for &row in rows {
                    body.row(18.0, |mut table_row| {
                        for col in &dataset.columns {
                            table_row.col(|ui| {
                                ui.label(col.values[row].to_string());
                            });
                        }
                    });
                }
            });
    });
}
