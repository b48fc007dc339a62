use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::{CampaignDataset, RateMetric};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Four side-by-side metric cards with the filtered means.
pub fn kpi_row(ui: &mut Ui, state: &AppState) {
    ui.heading("📊 Campaign Summary");
    ui.columns(RateMetric::ALL.len(), |cols| {
        for (col, metric) in cols.iter_mut().zip(RateMetric::ALL) {
            col.group(|ui: &mut Ui| {
                ui.label(metric.kpi_label());
                ui.label(RichText::new(state.summary.display(metric)).size(28.0).strong());
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Filtered rows table
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 18.0;

/// Render the filtered rows in file column order.
pub fn campaign_table(ui: &mut Ui, state: &AppState, dataset: &CampaignDataset) {
    let n_cols = dataset.columns.len();

    TableBuilder::new(ui)
        .id_salt("campaign_table")
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(TableColumn::auto().at_least(80.0), n_cols)
        .max_scroll_height(280.0)
        .header(20.0, |mut header| {
            for name in &dataset.headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(name.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                let rec = &dataset.records[state.visible_indices[row.index()]];
                for column in &dataset.columns {
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.cell_text(column));
                    });
                }
            });
        });
}
