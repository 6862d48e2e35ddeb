// Weight-progression chart geometry

use crate::analytics::ChartPoint;
use chrono::NaiveDate;

/// Space around the plot area, in pixels
pub const PADDING: f64 = 50.0;

/// Fraction of each bar slot covered by the bar
pub const BAR_FILL: f64 = 0.7;

/// Number of y-axis intervals (labels = intervals + 1)
pub const Y_TICKS: usize = 5;

/// Longest text bar `render_text` will draw
pub const MAX_BAR_COLUMNS: usize = 200;

const LOWER_PAD: f64 = 0.85;
const UPPER_PAD: f64 = 1.15;

/// Linear map from weights to the unit interval
///
/// The range is padded 15% below the lowest and above the highest weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    pub lo: f64,
    pub hi: f64,
}

impl ChartScale {
    pub fn from_points(points: &[ChartPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let max = points.iter().map(|p| p.weight).fold(f64::NEG_INFINITY, f64::max);
        let min = points.iter().map(|p| p.weight).fold(f64::INFINITY, f64::min);

        Some(Self {
            lo: min * LOWER_PAD,
            hi: max * UPPER_PAD,
        })
    }

    pub fn range(&self) -> f64 {
        self.hi - self.lo
    }

    /// Position of `weight` between `lo` (0.0) and `hi` (1.0)
    ///
    /// An empty range (every weight zero) puts all points on the baseline.
    pub fn normalize(&self, weight: f64) -> f64 {
        let range = self.range();
        if range <= 0.0 { 0.0 } else { (weight - self.lo) / range }
    }

    /// Value shown at y-axis tick `i` of `Y_TICKS`
    pub fn tick_value(&self, i: usize) -> f64 {
        self.lo + (i as f64 / Y_TICKS as f64) * self.range()
    }
}

/// One bar plus its line vertex
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub weight: f64,
    /// Centre of the slot; also the line vertex x
    pub x: f64,
    /// Top of the bar; also the line vertex y
    pub y: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub y: f64,
}

/// Pixel geometry of a chart drawn on a `width` x `height` surface
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub scale: ChartScale,
    pub plot_width: f64,
    pub plot_height: f64,
    pub bars: Vec<Bar>,
    pub ticks: Vec<Tick>,
}

impl ChartLayout {
    pub fn compute(points: &[ChartPoint], width: f64, height: f64) -> Option<Self> {
        let scale = ChartScale::from_points(points)?;
        let plot_width = width - PADDING * 2.0;
        let plot_height = height - PADDING * 2.0;
        let slot = plot_width / points.len() as f64;

        let bars = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let bar_height = scale.normalize(p.weight) * plot_height;
                let x = PADDING + i as f64 * slot + slot / 2.0;
                Bar {
                    date: p.date,
                    weight: p.weight,
                    x,
                    y: PADDING + plot_height - bar_height,
                    left: x - slot * BAR_FILL / 2.0,
                    width: slot * BAR_FILL,
                    height: bar_height,
                }
            })
            .collect();

        let ticks = (0..=Y_TICKS)
            .map(|i| Tick {
                value: scale.tick_value(i),
                y: PADDING + plot_height - (i as f64 / Y_TICKS as f64) * plot_height,
            })
            .collect();

        Some(Self {
            scale,
            plot_width,
            plot_height,
            bars,
            ticks,
        })
    }
}

/// Draw the series as horizontal bars, one line per point
///
/// Bar length uses the same scale as the pixel layout, with `bar_columns`
/// characters (at most `MAX_BAR_COLUMNS`) standing for the full range.
pub fn render_text(points: &[ChartPoint], bar_columns: usize) -> Option<String> {
    let scale = ChartScale::from_points(points)?;
    let bar_columns = bar_columns.min(MAX_BAR_COLUMNS);
    let mut out = String::new();

    for p in points {
        let filled = (scale.normalize(p.weight) * bar_columns as f64).round() as usize;
        out.push_str(&format!(
            "{:<7} {:<width$} {:.1}\n",
            p.date.format("%b %-d").to_string(),
            "█".repeat(filled.min(bar_columns)),
            p.weight,
            width = bar_columns
        ));
    }
    out.push_str(&format!(
        "{:<7} {:<width$} {:.0}\n",
        "",
        format!("{:.0}", scale.lo),
        scale.hi,
        width = bar_columns
    ));

    Some(out)
}
