use std::path::Path;

use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{chart, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    /// Start a session backed by the campaign file at `path`.
    pub fn new(path: &Path) -> Self {
        Self {
            state: AppState::load(path),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, table, chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(dataset) = self.state.dataset.clone() else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    let msg = self
                        .state
                        .status_message
                        .as_deref()
                        .unwrap_or("No campaign data loaded.");
                    ui.heading(egui::RichText::new(msg).color(egui::Color32::RED));
                });
                return;
            };

            table::kpi_row(ui, &self.state);
            ui.add_space(8.0);
            table::campaign_table(ui, &self.state, &dataset);
            ui.separator();
            ui.heading("📈 Engagement Trends");
            chart::campaign_chart(ui, &self.state, &dataset);
        });
    }
}
