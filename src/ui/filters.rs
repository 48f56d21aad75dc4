use std::collections::BTreeSet;

use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::model::CellValue;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// Filters tab – per-column multi-select widgets
// ---------------------------------------------------------------------------

/// Render the categorical filter widgets. Selections narrow the working view
/// for every tab; filters across columns combine with AND.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the loop: only the
    // value sets of columns that got a widget, all under the cardinality cap.
    let filterable: Vec<(String, BTreeSet<CellValue>)> = match &state.dataset {
        Some(ds) => ds
            .unique_values
            .iter()
            .filter(|(col, _)| state.filters.contains_key(*col))
            .map(|(col, vals)| (col.clone(), vals.clone()))
            .collect(),
        None => {
            ui.label("No dataset loaded.  (File → Open CSV…)");
            return;
        }
    };

    if filterable.is_empty() {
        ui.label("No filterable categorical columns in this dataset.");
        return;
    }

    panels::success_label(
        ui,
        &format!("Filtered rows: {}", state.visible_rows.len()),
    );
    ui.add_space(4.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (col, all_values) in &filterable {
                let selected = state.filters.entry(col.clone()).or_default();

                // Show count of selected / total in the header
                let n_selected = selected.len();
                let n_total = all_values.len();
                let header_text = format!("Filter {col}  ({n_selected}/{n_total})");

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        // Select all / none buttons
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(col);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(col);
                            }
                        });

                        // Re-borrow after potential mutation from All/None
                        let selected = state.filters.entry(col.clone()).or_default();

                        for val in all_values {
                            let is_selected = selected.contains(val);
                            let mut checked = is_selected;
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                if checked {
                                    selected.insert(val.clone());
                                } else {
                                    selected.remove(val);
                                }
                            }
                        }
                    });
            }
        });

    // Recompute the working view after any checkbox changes.
    state.refilter();
}
