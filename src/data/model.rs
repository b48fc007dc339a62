use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use super::summary::format_percent;

pub const CAMPAIGN_NAME: &str = "Campaign Name";
pub const SEND_DATE: &str = "Send Date";

// ---------------------------------------------------------------------------
// RateMetric – the four percentage columns
// ---------------------------------------------------------------------------

/// One of the four percentage metrics tracked per send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RateMetric {
    Open,
    Click,
    Unsubscribe,
    Bounce,
}

impl RateMetric {
    pub const ALL: [RateMetric; 4] = [
        RateMetric::Open,
        RateMetric::Click,
        RateMetric::Unsubscribe,
        RateMetric::Bounce,
    ];

    /// Position of this metric in [`CampaignRecord::rates`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Exact CSV header for this metric.
    pub fn header(self) -> &'static str {
        match self {
            RateMetric::Open => "Open Rate (%)",
            RateMetric::Click => "Click Rate (%)",
            RateMetric::Unsubscribe => "Unsubscribe Rate (%)",
            RateMetric::Bounce => "Bounce Rate (%)",
        }
    }

    /// Caption used on the KPI row.
    pub fn kpi_label(self) -> &'static str {
        match self {
            RateMetric::Open => "Avg. Open Rate",
            RateMetric::Click => "Avg. Click Rate",
            RateMetric::Unsubscribe => "Avg. Unsubscribe Rate",
            RateMetric::Bounce => "Avg. Bounce Rate",
        }
    }
}

impl fmt::Display for RateMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Column – one header of the source file, in file order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    CampaignName,
    SendDate,
    Rate(RateMetric),
    /// Any other header; the value is the position in [`CampaignRecord::extra`].
    Extra(usize),
}

// ---------------------------------------------------------------------------
// CampaignRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single campaign send (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignRecord {
    pub campaign_name: String,
    /// `None` when the cell was empty.
    pub send_date: Option<NaiveDate>,
    /// Indexed by [`RateMetric::index`]; NaN marks an empty cell.
    pub rates: [f64; 4],
    /// Unrecognised columns, kept verbatim.
    pub extra: Vec<String>,
}

impl CampaignRecord {
    pub fn new(campaign_name: impl Into<String>, send_date: NaiveDate, rates: [f64; 4]) -> Self {
        Self {
            campaign_name: campaign_name.into(),
            send_date: Some(send_date),
            rates,
            extra: Vec::new(),
        }
    }

    pub fn rate(&self, metric: RateMetric) -> f64 {
        self.rates[metric.index()]
    }

    /// Render one cell the way the table shows it.
    pub fn cell_text(&self, column: &Column) -> String {
        match column {
            Column::CampaignName => self.campaign_name.clone(),
            Column::SendDate => self
                .send_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            Column::Rate(metric) => {
                let v = self.rate(*metric);
                if v.is_nan() {
                    String::new()
                } else {
                    format_percent(v)
                }
            }
            Column::Extra(i) => self.extra.get(*i).cloned().unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// CampaignDataset – the complete loaded file
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed campaign index and date bounds.
#[derive(Debug, Clone)]
pub struct CampaignDataset {
    pub records: Vec<CampaignRecord>,
    /// Header names in file order.
    pub headers: Vec<String>,
    /// Semantic column kinds, parallel to `headers`.
    pub columns: Vec<Column>,
    /// Distinct campaign names in order of first appearance.
    pub campaign_names: Vec<String>,
    /// (min, max) send date over rows that have one.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl CampaignDataset {
    /// Build a dataset using the standard six-column layout.
    pub fn from_records(records: Vec<CampaignRecord>) -> Self {
        let mut headers = vec![CAMPAIGN_NAME.to_string(), SEND_DATE.to_string()];
        let mut columns = vec![Column::CampaignName, Column::SendDate];
        for metric in RateMetric::ALL {
            headers.push(metric.header().to_string());
            columns.push(Column::Rate(metric));
        }
        Self::with_columns(headers, columns, records)
    }

    /// Build column indices from the loaded records.
    pub fn with_columns(
        headers: Vec<String>,
        columns: Vec<Column>,
        records: Vec<CampaignRecord>,
    ) -> Self {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut campaign_names = Vec::new();
        let mut date_bounds: Option<(NaiveDate, NaiveDate)> = None;

        for rec in &records {
            if seen.insert(rec.campaign_name.as_str()) {
                campaign_names.push(rec.campaign_name.clone());
            }
            if let Some(d) = rec.send_date {
                date_bounds = Some(match date_bounds {
                    Some((lo, hi)) => (lo.min(d), hi.max(d)),
                    None => (d, d),
                });
            }
        }

        CampaignDataset {
            records,
            headers,
            columns,
            campaign_names,
            date_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn campaign_index_keeps_first_appearance_order() {
        let ds = CampaignDataset::from_records(vec![
            CampaignRecord::new("Welcome", date(2024, 3, 1), [1.0; 4]),
            CampaignRecord::new("Black Friday", date(2024, 1, 5), [1.0; 4]),
            CampaignRecord::new("Welcome", date(2024, 2, 1), [1.0; 4]),
        ]);
        assert_eq!(ds.campaign_names, vec!["Welcome", "Black Friday"]);
        assert_eq!(ds.date_bounds, Some((date(2024, 1, 5), date(2024, 3, 1))));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn date_bounds_ignore_missing_dates() {
        let mut undated = CampaignRecord::new("A", date(2024, 1, 1), [0.0; 4]);
        undated.send_date = None;
        let ds = CampaignDataset::from_records(vec![undated]);
        assert_eq!(ds.date_bounds, None);
        assert!(!ds.is_empty());
    }

    #[test]
    fn cells_render_dates_and_percentages() {
        let mut rec = CampaignRecord::new("A", date(2024, 1, 9), [20.0, 3.456, 0.1, f64::NAN]);
        rec.extra.push("Segment X".into());
        assert_eq!(rec.cell_text(&Column::SendDate), "2024-01-09");
        assert_eq!(rec.cell_text(&Column::Rate(RateMetric::Open)), "20.00%");
        assert_eq!(rec.cell_text(&Column::Rate(RateMetric::Click)), "3.46%");
        assert_eq!(rec.cell_text(&Column::Rate(RateMetric::Bounce)), "");
        assert_eq!(rec.cell_text(&Column::Extra(0)), "Segment X");
    }
}
