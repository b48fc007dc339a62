use chrono::Datelike;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔍 Filter Campaigns");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Campaign multi-select ----
            let n_selected = state.filters.campaigns.len();
            let n_total = dataset.campaign_names.len();
            ui.strong(format!("Select Campaign(s)  ({n_selected}/{n_total})"));

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for name in &dataset.campaign_names {
                let mut checked = state.filters.campaigns.contains(name);
                if ui.checkbox(&mut checked, name.as_str()).changed() {
                    state.toggle_campaign(name);
                }
            }
            ui.separator();

            // ---- Date range ----
            ui.strong("Select Date Range");
            let mut start = state.filters.start;
            let mut end = state.filters.end;
            let years = dataset
                .date_bounds
                .map(|(lo, hi)| lo.year()..=hi.year())
                .unwrap_or_else(|| start.year()..=start.year());
            egui::Grid::new("date_range")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    ui.label("From");
                    ui.add(
                        DatePickerButton::new(&mut start)
                            .id_salt("start_date")
                            .start_end_years(years.clone()),
                    );
                    ui.end_row();
                    ui.label("To");
                    ui.add(
                        DatePickerButton::new(&mut end)
                            .id_salt("end_date")
                            .start_end_years(years),
                    );
                    ui.end_row();
                });
            if (start, end) != (state.filters.start, state.filters.end) {
                state.set_date_range(start, end);
            }
            if let Some((lo, hi)) = dataset.date_bounds {
                ui.small(format!("Data spans {lo} – {hi}"));
            }
            if start > end {
                ui.label(RichText::new("Start date is after end date").color(Color32::YELLOW));
            }
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with row counts and any load error.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("📧 SFMC Email Campaign Performance Dashboard");

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
