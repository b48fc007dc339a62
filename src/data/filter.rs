use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{CampaignDataset, CampaignRecord};

// ---------------------------------------------------------------------------
// Filter predicate: selected campaigns ∧ inclusive send-date interval
// ---------------------------------------------------------------------------

/// Current sidebar selections.
///
/// An empty campaign set selects nothing. A reversed interval
/// (`start > end`) also selects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub campaigns: BTreeSet<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FilterState {
    /// Whether a single record passes both predicates.
    pub fn matches(&self, record: &CampaignRecord) -> bool {
        if !self.campaigns.contains(&record.campaign_name) {
            return false;
        }
        match record.send_date {
            Some(d) => self.start <= d && d <= self.end,
            None => false,
        }
    }
}

/// Initialise a [`FilterState`] with every campaign and the full date range.
///
/// `fallback` is used for both ends when the dataset carries no dates.
pub fn init_filter_state(dataset: &CampaignDataset, fallback: NaiveDate) -> FilterState {
    let (start, end) = dataset.date_bounds.unwrap_or((fallback, fallback));
    FilterState {
        campaigns: dataset.campaign_names.iter().cloned().collect(),
        start,
        end,
    }
}

/// Pull `date` into the inclusive `bounds`; unchanged when there are none.
pub fn clamp_to_bounds(date: NaiveDate, bounds: Option<(NaiveDate, NaiveDate)>) -> NaiveDate {
    match bounds {
        Some((lo, hi)) => date.clamp(lo, hi),
        None => date,
    }
}

/// Return indices of records that pass the filter, in dataset order.
pub fn filtered_indices(dataset: &CampaignDataset, filters: &FilterState) -> Vec<usize> {
    if filters.campaigns.is_empty() || filters.start > filters.end {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| filters.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
