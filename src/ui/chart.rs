use std::collections::HashMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::data::model::{CampaignDataset, RateMetric};
use crate::state::AppState;

/// Horizontal space taken by the four bars of one campaign.
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Layout: filtered rows → grouped bar positions
// ---------------------------------------------------------------------------

/// One bar segment in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    pub x: f64,
    pub base: f64,
    pub height: f64,
    pub campaign: String,
}

/// All segments of one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub metric: RateMetric,
    pub segments: Vec<BarSegment>,
}

/// Categories (campaign names, first-appearance order) and per-metric bars.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedBars {
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

impl GroupedBars {
    pub fn bar_width() -> f64 {
        GROUP_WIDTH / RateMetric::ALL.len() as f64
    }
}

/// Lay out one bar per row and metric. Campaign `i` is centred on `x = i`;
/// rows sharing a campaign stack on top of each other within their slot.
/// Missing (NaN) rates draw nothing.
pub fn grouped_bars(dataset: &CampaignDataset, indices: &[usize]) -> GroupedBars {
    let mut categories: Vec<String> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    for &i in indices {
        let name = dataset.records[i].campaign_name.as_str();
        if !slot.contains_key(name) {
            slot.insert(name, categories.len());
            categories.push(name.to_string());
        }
    }

    let width = GroupedBars::bar_width();
    let n_metrics = RateMetric::ALL.len() as f64;

    let series = RateMetric::ALL
        .into_iter()
        .map(|metric| {
            let offset = (metric.index() as f64 - (n_metrics - 1.0) / 2.0) * width;
            let mut stack_top = vec![0.0; categories.len()];
            let segments = indices
                .iter()
                .filter_map(|&i| {
                    let rec = &dataset.records[i];
                    let height = rec.rate(metric);
                    if height.is_nan() {
                        return None;
                    }
                    let cat = slot[rec.campaign_name.as_str()];
                    let base = stack_top[cat];
                    stack_top[cat] += height;
                    Some(BarSegment {
                        x: cat as f64 + offset,
                        base,
                        height,
                        campaign: rec.campaign_name.clone(),
                    })
                })
                .collect();
            BarSeries { metric, segments }
        })
        .collect();

    GroupedBars { categories, series }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the "Performance by Campaign" grouped bar chart.
pub fn campaign_chart(ui: &mut Ui, state: &AppState, dataset: &CampaignDataset) {
    let layout = grouped_bars(dataset, &state.visible_indices);
    let width = GroupedBars::bar_width();
    let categories = layout.categories.clone();

    ui.strong("Performance by Campaign");

    Plot::new("campaign_chart")
        .legend(Legend::default())
        .x_axis_label("Campaign Name")
        .y_axis_label("Rate (%)")
        .x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if (v - v.round()).abs() > 1e-6 || v < 0.0 {
                return String::new();
            }
            categories.get(v.round() as usize).cloned().unwrap_or_default()
        })
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in layout.series {
                let bars: Vec<Bar> = series
                    .segments
                    .into_iter()
                    .map(|seg| {
                        Bar::new(seg.x, seg.height)
                            .base_offset(seg.base)
                            .width(width)
                            .name(format!("{} – {}", seg.campaign, series.metric))
                    })
                    .collect();

                let chart = BarChart::new(series.metric.header(), bars)
                    .color(state.series_colors.color_for(series.metric));

                plot_ui.bar_chart(chart);
            }
        });
}
