use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{chart, filters, overview, panels, story};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl Default for DashboardApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Tab strip ----
        egui::TopBottomPanel::top("tab_strip").show(ctx, |ui| {
            panels::tab_strip(ui, &mut self.state);
        });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.state.tab {
                Tab::Overview => overview::show(ui, &self.state),
                Tab::Charts => chart::show(ui, &mut self.state),
                Tab::Filters => filters::show(ui, &mut self.state),
                Tab::Story => story::show(ui, &mut self.state),
            }
        });
    }
}
