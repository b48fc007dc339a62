use super::model::{CampaignDataset, RateMetric};

/// Column-wise means of the four rate metrics over a filtered view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiSummary {
    /// Indexed by [`RateMetric::index`]. NaN when no value contributed.
    pub means: [f64; 4],
}

impl Default for KpiSummary {
    fn default() -> Self {
        Self {
            means: [f64::NAN; 4],
        }
    }
}

impl KpiSummary {
    /// Compute the summary for the rows at `indices`.
    pub fn compute(dataset: &CampaignDataset, indices: &[usize]) -> Self {
        let mut means = [f64::NAN; 4];
        for metric in RateMetric::ALL {
            means[metric.index()] = mean(
                indices
                    .iter()
                    .map(|&i| dataset.records[i].rate(metric)),
            );
        }
        Self { means }
    }

    pub fn mean(&self, metric: RateMetric) -> f64 {
        self.means[metric.index()]
    }

    /// KPI text, e.g. `"20.00%"` or `"NaN%"`.
    pub fn display(&self, metric: RateMetric) -> String {
        format_percent(self.mean(metric))
    }
}

/// Arithmetic mean skipping NaN entries; NaN if nothing remains.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

/// Two decimals with a percent suffix.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::CampaignRecord;

    #[test]
    fn mean_skips_missing_values() {
        assert_eq!(mean([10.0, f64::NAN, 20.0]), 15.0);
        assert!(mean(std::iter::empty::<f64>()).is_nan());
        assert!(mean([f64::NAN]).is_nan());
    }

    #[test]
    fn empty_view_displays_nan() {
        let ds = CampaignDataset::from_records(vec![CampaignRecord::new(
            "A",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            [1.0, 2.0, 3.0, 4.0],
        )]);
        let kpi = KpiSummary::compute(&ds, &[]);
        for metric in RateMetric::ALL {
            assert!(kpi.mean(metric).is_nan());
            assert_eq!(kpi.display(metric), "NaN%");
        }
    }

    #[test]
    fn summary_averages_selected_rows_only() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ds = CampaignDataset::from_records(vec![
            CampaignRecord::new("A", d, [20.0, 2.0, 0.2, 1.0]),
            CampaignRecord::new("B", d, [40.0, 4.0, 0.4, 3.0]),
            CampaignRecord::new("C", d, [90.0, 9.0, 0.9, 9.0]),
        ]);
        let kpi = KpiSummary::compute(&ds, &[0, 1]);
        assert_eq!(kpi.display(RateMetric::Open), "30.00%");
        assert_eq!(kpi.display(RateMetric::Click), "3.00%");
        assert_eq!(kpi.display(RateMetric::Unsubscribe), "0.30%");
        assert_eq!(kpi.display(RateMetric::Bounce), "2.00%");
    }

    #[test]
    fn percent_rounds_to_two_decimals() {
        assert_eq!(format_percent(12.345_6), "12.35%");
        assert_eq!(format_percent(0.0), "0.00%");
    }
}
