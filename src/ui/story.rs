use std::ops::RangeInclusive;

use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::data::story::{group_sums, negative_rows, summary};
use crate::state::{AppState, Scene};
use crate::ui::chart::column_combo;
use crate::ui::overview::rows_table;
use crate::ui::panels;

/// Negative rows shown in the conflict scene's sample table.
const CONFLICT_SAMPLE_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Story tab – four-scene narrative
// ---------------------------------------------------------------------------

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🎭 Data Story Mode");

    if state.dataset.is_none() {
        ui.label("No dataset loaded.  (File → Open CSV…)");
        return;
    }

    // Scene radio. Switching scenes is a pure re-render, nothing is retained.
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Story Progress:");
        for scene in Scene::ALL {
            ui.selectable_value(&mut state.scene, scene, scene.label());
        }
    });
    ui.separator();

    match state.scene {
        Scene::Setup => scene_setup(ui, state),
        Scene::Change => scene_change(ui, state),
        Scene::Conflict => scene_conflict(ui, state),
        Scene::Insight => scene_insight(ui, state),
    }
}

// ---------------------------------------------------------------------------
// Scene 1 – Setup
// ---------------------------------------------------------------------------

fn scene_setup(ui: &mut Ui, state: &AppState) {
    ui.strong("The Big Picture");
    ui.add_space(4.0);

    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.columns(2, |cols| {
        metric(&mut cols[0], "Rows", &state.visible_rows.len().to_string());
        metric(&mut cols[1], "Columns", &dataset.columns.len().to_string());
    });
    ui.add_space(4.0);

    if dataset.numeric_columns().is_empty() {
        panels::warning_label(ui, "This dataset is mostly descriptive (text-based).");
    } else {
        panels::info_label(ui, "This dataset contains measurable numeric data.");
    }
}

// ---------------------------------------------------------------------------
// Scene 2 – Change
// ---------------------------------------------------------------------------

fn scene_change(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Something Changed");
    ui.add_space(4.0);

    // Column-name lists only; the full dataset is re-borrowed after the
    // combos are done mutating the selections.
    let (categorical, numeric) = match &state.dataset {
        Some(ds) => (ds.categorical_columns(), ds.numeric_columns()),
        None => return,
    };

    if categorical.is_empty() || numeric.is_empty() {
        panels::warning_label(ui, "Not enough structure to analyse changes.");
        return;
    }

    // Group combo rebuilds the bar colours when it changes.
    let previous_group = state.group_column.clone();
    column_combo(ui, "Group by", &categorical, &mut state.group_column);
    if state.group_column != previous_group {
        if let Some(col) = state.group_column.clone() {
            state.set_group_column(col);
        }
    }
    column_combo(ui, "Measure", &numeric, &mut state.measure_column);

    let (Some(group_col), Some(value_col)) =
        (state.group_column.clone(), state.measure_column.clone())
    else {
        return;
    };
    let Some(dataset) = &state.dataset else {
        return;
    };

    let sums = group_sums(dataset, &state.visible_rows, &group_col, &value_col);
    if sums.is_empty() {
        panels::info_label(ui, "No rows in the current view.");
        return;
    }

    let labels: Vec<String> = sums.iter().map(|(g, _)| g.to_string()).collect();
    let bars: Vec<Bar> = sums
        .iter()
        .enumerate()
        .map(|(i, (group, sum))| {
            let mut bar = Bar::new(i as f64, *sum).name(group.to_string()).width(0.6);
            if let Some(cm) = &state.group_colors {
                bar = bar.fill(cm.color_for(group));
            }
            bar
        })
        .collect();

    Plot::new("group_sums")
        .y_axis_label(value_col.clone())
        .height(260.0)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    // Sorted ascending, so trailer first, leader last.
    let (trailer, _) = &sums[0];
    let (leader, _) = &sums[sums.len() - 1];
    panels::info_label(
        ui,
        &format!("{leader} leads in {value_col}, while {trailer} trails."),
    );
}

// ---------------------------------------------------------------------------
// Scene 3 – Conflict
// ---------------------------------------------------------------------------

fn scene_conflict(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Tension in the Data");
    ui.add_space(4.0);

    let numeric = match &state.dataset {
        Some(ds) => ds.numeric_columns(),
        None => return,
    };
    if numeric.is_empty() {
        panels::info_label(ui, "No numeric columns to inspect for conflicts.");
        return;
    }

    column_combo(ui, "Analyse column", &numeric, &mut state.conflict_column);
    let Some(col) = state.conflict_column.clone() else {
        return;
    };
    let Some(dataset) = &state.dataset else {
        return;
    };

    let negatives = negative_rows(dataset, &state.visible_rows, &col);
    if negatives.is_empty() {
        panels::success_label(ui, "No obvious conflicts detected.");
        return;
    }

    panels::error_label(
        ui,
        &format!("{} records have negative {col} values.", negatives.len()),
    );
    ui.add_space(4.0);

    let sample: Vec<usize> = negatives
        .iter()
        .copied()
        .take(CONFLICT_SAMPLE_ROWS)
        .collect();
    rows_table(ui, dataset, &sample, "conflict_rows");
}

// ---------------------------------------------------------------------------
// Scene 4 – Insight
// ---------------------------------------------------------------------------

fn scene_insight(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Insight");
    ui.add_space(4.0);

    let numeric = match &state.dataset {
        Some(ds) => ds.numeric_columns(),
        None => return,
    };
    if numeric.is_empty() {
        panels::info_label(
            ui,
            "Insight: the dataset is descriptive. Stories here are about categories, not quantities.",
        );
        return;
    }

    column_combo(ui, "Reflect on", &numeric, &mut state.insight_column);
    let Some(col) = state.insight_column.clone() else {
        return;
    };
    let Some(dataset) = &state.dataset else {
        return;
    };

    let Some(stats) = summary(dataset, &state.visible_rows, &col) else {
        panels::warning_label(ui, &format!("No values of {col} in the current view."));
        return;
    };

    ui.columns(3, |cols| {
        metric(&mut cols[0], "Average", &format!("{:.2}", stats.mean));
        metric(&mut cols[1], "Max", &format!("{:.2}", stats.max));
        metric(&mut cols[2], "Min", &format!("{:.2}", stats.min));
    });
    ui.add_space(4.0);

    panels::info_label(
        ui,
        &format!("Insight: the distribution of {col} tells the real story, not just totals."),
    );
}

// ---------------------------------------------------------------------------
// Metric widget
// ---------------------------------------------------------------------------

/// A label-over-value block, the dashboard's "metric" display.
fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small().weak());
        ui.heading(RichText::new(value).strong());
    });
}
