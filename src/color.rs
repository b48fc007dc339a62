use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::RateMetric;

// ---------------------------------------------------------------------------
// Series colours: one per rate metric
// ---------------------------------------------------------------------------

/// Engagement metrics sit on cool hues, attrition metrics on warm ones.
fn hue_for(metric: RateMetric) -> f32 {
    match metric {
        RateMetric::Open => 145.0,
        RateMetric::Click => 210.0,
        RateMetric::Unsubscribe => 35.0,
        RateMetric::Bounce => 0.0,
    }
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Fixed colour assignment for the four bar series.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    colors: [Color32; 4],
}

impl Default for SeriesColors {
    fn default() -> Self {
        Self {
            colors: RateMetric::ALL.map(|m| hsl_to_color32(Hsl::new(hue_for(m), 0.65, 0.50))),
        }
    }
}

impl SeriesColors {
    pub fn color_for(&self, metric: RateMetric) -> Color32 {
        self.colors[metric.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_metric_has_its_own_color() {
        let colors = SeriesColors::default();
        for (i, a) in RateMetric::ALL.into_iter().enumerate() {
            for b in RateMetric::ALL.into_iter().skip(i + 1) {
                assert_ne!(colors.color_for(a), colors.color_for(b), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn attrition_metrics_are_warm() {
        let colors = SeriesColors::default();
        let bounce = colors.color_for(RateMetric::Bounce);
        let click = colors.color_for(RateMetric::Click);
        assert!(bounce.r() > bounce.b());
        assert!(click.b() > click.r());
    }
}
