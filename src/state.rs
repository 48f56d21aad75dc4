use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::data::filter::{FilterState, filtered_indices, init_filter_state};
use crate::data::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Tab / scene selection
// ---------------------------------------------------------------------------

/// The four dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Charts,
    Filters,
    Story,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Charts, Tab::Filters, Tab::Story];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "📄 Overview",
            Tab::Charts => "📈 Charts",
            Tab::Filters => "🎛 Filters",
            Tab::Story => "🎭 Story",
        }
    }
}

/// The four mutually exclusive story scenes. Switching is a pure re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Setup,
    Change,
    Conflict,
    Insight,
}

impl Scene {
    pub const ALL: [Scene; 4] = [Scene::Setup, Scene::Change, Scene::Conflict, Scene::Insight];

    pub fn label(&self) -> &'static str {
        match self {
            Scene::Setup => "Scene 1: Setup",
            Scene::Change => "Scene 2: Change",
            Scene::Conflict => "Scene 3: Conflict",
            Scene::Insight => "Scene 4: Insight",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. One instance per session;
/// every view reads from it, nothing is process-global.
pub struct AppState {
    /// Loaded dataset (None until user opens a file).
    pub dataset: Option<Dataset>,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Indices of rows passing the current filters — the working view.
    pub visible_rows: Vec<usize>,

    /// Active tab.
    pub tab: Tab,

    /// Active story scene.
    pub scene: Scene,

    /// Chart axis selections (numeric columns).
    pub chart_x: Option<String>,
    pub chart_y: Option<String>,

    /// Scene 2 selections: categorical group and numeric measure.
    pub group_column: Option<String>,
    pub measure_column: Option<String>,

    /// Bar colors for the current group column.
    pub group_colors: Option<ColorMap>,

    /// Scene 3 / Scene 4 column selections.
    pub conflict_column: Option<String>,
    pub insight_column: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: FilterState::default(),
            visible_rows: Vec::new(),
            tab: Tab::Overview,
            scene: Scene::Setup,
            chart_x: None,
            chart_y: None,
            group_column: None,
            measure_column: None,
            group_colors: None,
            conflict_column: None,
            insight_column: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, initialise filters and selections.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.filters = init_filter_state(&dataset);
        self.visible_rows = (0..dataset.len()).collect();

        let numeric = dataset.numeric_columns();
        let categorical = dataset.categorical_columns();

        self.chart_x = numeric.first().cloned();
        self.chart_y = numeric.get(1).or_else(|| numeric.first()).cloned();
        self.measure_column = numeric.first().cloned();
        self.conflict_column = numeric.first().cloned();
        self.insight_column = numeric.first().cloned();

        self.group_column = categorical.first().cloned();

        self.dataset = Some(dataset);
        self.rebuild_group_colors();
        self.status_message = None;
    }

    /// Rebuild the bar colour map from the current `group_column`.
    pub fn rebuild_group_colors(&mut self) {
        self.group_colors = match (&self.dataset, &self.group_column) {
            (Some(ds), Some(col)) => ds
                .unique_values
                .get(col)
                .map(|vals| ColorMap::new(col, vals)),
            _ => None,
        };
    }

    /// Recompute the working view after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_rows = filtered_indices(ds, &self.filters);
        }
    }

    /// Set the Scene 2 group column and rebuild its colours.
    pub fn set_group_column(&mut self, col: String) {
        self.group_column = Some(col);
        self.rebuild_group_colors();
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: &str, value: &CellValue) {
        let selected = self.filters.entry(column.to_string()).or_default();
        if selected.contains(value) {
            selected.remove(value);
        } else {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: &str) {
        if let Some(ds) = &self.dataset {
            if let Some(all_vals) = ds.unique_values.get(column) {
                self.filters.insert(column.to_string(), all_vals.clone());
                self.refilter();
            }
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: &str) {
        self.filters.insert(column.to_string(), BTreeSet::new());
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bytes;
    use crate::data::model::CellValue;

    fn loaded_state() -> AppState {
        let ds = load_bytes(b"Region,Sales,Cost\nEast,10,1\nWest,-5,2\nEast,7,3\n").unwrap();
        let mut state = AppState::default();
        state.set_dataset(ds);
        state
    }

    #[test]
    fn set_dataset_defaults_selections() {
        let state = loaded_state();
        assert_eq!(state.chart_x.as_deref(), Some("Sales"));
        assert_eq!(state.chart_y.as_deref(), Some("Cost"));
        assert_eq!(state.group_column.as_deref(), Some("Region"));
        assert_eq!(state.visible_rows, vec![0, 1, 2]);
        assert!(state.group_colors.is_some());
    }

    #[test]
    fn toggling_a_value_updates_the_working_view() {
        let mut state = loaded_state();
        // deselect "West" → only East rows remain, every consumer sees it
        state.toggle_filter_value("Region", &CellValue::Text("West".into()));
        assert_eq!(state.visible_rows, vec![0, 2]);

        // toggle back → full view restored
        state.toggle_filter_value("Region", &CellValue::Text("West".into()));
        assert_eq!(state.visible_rows, vec![0, 1, 2]);
    }

    #[test]
    fn group_colors_cover_high_cardinality_columns() {
        // columns above the filter cap get no widget but stay indexed,
        // so Scene 2 can still colour their bars
        let mut csv = String::from("id,Sales\n");
        for i in 0..25 {
            csv.push_str(&format!("row{i},1\n"));
        }
        let ds = load_bytes(csv.as_bytes()).unwrap();
        let mut state = AppState::default();
        state.set_dataset(ds);

        assert!(state.filters.is_empty());
        state.set_group_column("id".into());
        let colors = state.group_colors.as_ref().unwrap();
        assert_eq!(colors.column, "id");
    }

    #[test]
    fn select_none_then_all_round_trips() {
        let mut state = loaded_state();
        state.select_none("Region");
        assert!(state.visible_rows.is_empty());
        state.select_all("Region");
        assert_eq!(state.visible_rows, vec![0, 1, 2]);
    }
}
