use eframe::egui::{self, Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// Charts tab – X/Y line chart over numeric columns
// ---------------------------------------------------------------------------

/// True when the dataset has enough numeric columns for an X/Y chart.
pub fn has_enough_numeric(numeric_cols: &[String]) -> bool {
    numeric_cols.len() >= 2
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Charts");

    // Only the column names leave the dataset borrow; the combos below
    // mutate selection state, the plot then renders from a fresh borrow.
    let numeric_cols = match &state.dataset {
        Some(ds) => ds.numeric_columns(),
        None => {
            ui.label("No dataset loaded.  (File → Open CSV…)");
            return;
        }
    };

    panels::success_label(
        ui,
        &format!("Filtered rows: {}", state.visible_rows.len()),
    );

    if !has_enough_numeric(&numeric_cols) {
        panels::warning_label(ui, "⚠ Not enough numeric data to plot");
        return;
    }

    column_combo(ui, "Select X-axis", &numeric_cols, &mut state.chart_x);
    column_combo(ui, "Select Y-axis", &numeric_cols, &mut state.chart_y);

    let (Some(x_col), Some(y_col)) = (state.chart_x.clone(), state.chart_y.clone()) else {
        return;
    };
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.add_space(4.0);
    ui.strong(format!("{y_col} vs {x_col}"));

    // Points follow row order of the working view; no implicit sort by X.
    let points: PlotPoints = state
        .visible_rows
        .iter()
        .filter_map(|&row| {
            let x = dataset.cell(row, &x_col).as_f64()?;
            let y = dataset.cell(row, &y_col).as_f64()?;
            Some([x, y])
        })
        .collect();

    Plot::new("line_chart")
        .x_axis_label(x_col)
        .y_axis_label(y_col)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(Color32::LIGHT_BLUE).width(1.5));
        });
}

// ---------------------------------------------------------------------------
// Column selector
// ---------------------------------------------------------------------------

/// Labelled combo box over a list of column names.
/// Falls back to the first column when the selection goes stale.
pub fn column_combo(ui: &mut Ui, label: &str, columns: &[String], selection: &mut Option<String>) {
    if selection
        .as_ref()
        .map(|s| !columns.contains(s))
        .unwrap_or(true)
    {
        *selection = columns.first().cloned();
    }
    let current = selection.clone().unwrap_or_default();

    egui::ComboBox::from_label(label)
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                if ui.selectable_label(current == *col, col).clicked() {
                    *selection = Some(col.clone());
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bytes;

    #[test]
    fn one_numeric_column_is_not_enough_to_plot() {
        let ds = load_bytes(b"Region,Sales\nEast,10\nWest,-5\n").unwrap();
        assert!(!has_enough_numeric(&ds.numeric_columns()));
    }

    #[test]
    fn two_numeric_columns_are_enough() {
        let ds = load_bytes(b"Sales,Cost\n10,1\n-5,2\n").unwrap();
        assert!(has_enough_numeric(&ds.numeric_columns()));
    }
}
