use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use crate::color::SeriesColors;
use crate::data::filter::{FilterState, clamp_to_bounds, filtered_indices, init_filter_state};
use crate::data::loader::load_cached;
use crate::data::model::CampaignDataset;
use crate::data::summary::KpiSummary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None if loading failed).
    pub dataset: Option<Arc<CampaignDataset>>,

    /// Sidebar selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// KPI means over `visible_indices`.
    pub summary: KpiSummary,

    /// Colours of the four bar series.
    pub series_colors: SeriesColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let today = today();
        Self {
            dataset: None,
            filters: FilterState {
                campaigns: Default::default(),
                start: today,
                end: today,
            },
            visible_indices: Vec::new(),
            summary: KpiSummary::default(),
            series_colors: SeriesColors::default(),
            status_message: None,
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl AppState {
    /// Load the campaign file and initialise the session, or record the error.
    pub fn load(path: &Path) -> Self {
        let mut state = Self::default();
        match load_dataset(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} campaign rows ({} campaigns, dates {:?})",
                    dataset.len(),
                    dataset.campaign_names.len(),
                    dataset.date_bounds
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load campaign data: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
        state
    }

    /// Ingest a loaded dataset and reset filters to their defaults.
    pub fn set_dataset(&mut self, dataset: Arc<CampaignDataset>) {
        self.filters = init_filter_state(&dataset, today());
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and the KPI summary after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.filters);
        self.summary = KpiSummary::compute(ds, &self.visible_indices);
        log::debug!(
            "Filter {:?} → {} of {} rows",
            self.filters,
            self.visible_indices.len(),
            ds.len()
        );
    }

    /// Restore the default selections (all campaigns, full date range).
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters = init_filter_state(ds, today());
            self.refilter();
        }
    }

    /// Toggle a single campaign in the selection.
    pub fn toggle_campaign(&mut self, name: &str) {
        if !self.filters.campaigns.remove(name) {
            self.filters.campaigns.insert(name.to_string());
        }
        self.refilter();
    }

    /// Select every campaign.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters.campaigns = ds.campaign_names.iter().cloned().collect();
            self.refilter();
        }
    }

    /// Deselect every campaign.
    pub fn select_none(&mut self) {
        self.filters.campaigns.clear();
        self.refilter();
    }

    /// Set the date interval, each end clamped to the data's send-date bounds.
    /// A reversed interval is kept as-is and selects nothing.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let bounds = self.dataset.as_ref().and_then(|ds| ds.date_bounds);
        self.filters.start = clamp_to_bounds(start, bounds);
        self.filters.end = clamp_to_bounds(end, bounds);
        self.refilter();
    }
}

fn load_dataset(path: &Path) -> Result<Arc<CampaignDataset>> {
    load_cached(path).with_context(|| format!("loading {}", path.display()))
}
