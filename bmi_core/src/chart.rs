//! Band chart: where a BMI value falls against the fixed category bands.
//!
//! The chart input is one optional BMI value plus the fixed band table.
//! Two renderers are provided: SVG via plotters, and a plain-text strip
//! for terminals.

use crate::engine::classify;
use crate::history::HistoryStore;
use crate::{BmiCategory, Error, Result};
use plotters::prelude::*;

/// Edges of the drawn bands, lowest to highest
pub const BAND_EDGES: [f64; 5] = [15.0, 18.5, 25.0, 30.0, 40.0];

/// One coloured zone on the chart
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
    pub category: BmiCategory,
    pub legend: &'static str,
}

impl Band {
    /// Fill colour for this band
    pub fn colour(&self) -> RGBColor {
        match self.category {
            BmiCategory::Underweight => RGBColor(0, 0, 255),
            BmiCategory::NormalWeight => RGBColor(0, 128, 0),
            BmiCategory::Overweight => RGBColor(255, 255, 0),
            BmiCategory::Obese => RGBColor(255, 0, 0),
        }
    }

    /// Glyph used by the text renderer
    fn glyph(&self) -> char {
        glyph_for(self.category)
    }
}

/// The fixed band table
pub const BANDS: [Band; 4] = [
    Band {
        lower: 15.0,
        upper: 18.5,
        category: BmiCategory::Underweight,
        legend: "Underweight",
    },
    Band {
        lower: 18.5,
        upper: 25.0,
        category: BmiCategory::NormalWeight,
        legend: "Normal",
    },
    Band {
        lower: 25.0,
        upper: 30.0,
        category: BmiCategory::Overweight,
        legend: "Overweight",
    },
    Band {
        lower: 30.0,
        upper: 40.0,
        category: BmiCategory::Obese,
        legend: "Obese",
    },
];

/// Opacity of the band fills
const BAND_ALPHA: f64 = 0.3;

/// Number of dashes in the marker line
const MARKER_DASHES: usize = 10;

/// Split `from..to` into `count` dashes separated by equal gaps
fn dash_segments(from: f64, to: f64, count: usize) -> Vec<(f64, f64)> {
    let period = (to - from) / count as f64;
    (0..count)
        .map(|i| {
            let start = from + period * i as f64;
            (start, start + period / 2.0)
        })
        .collect()
}

fn glyph_for(category: BmiCategory) -> char {
    match category {
        BmiCategory::Underweight => '.',
        BmiCategory::NormalWeight => '=',
        BmiCategory::Overweight => '+',
        BmiCategory::Obese => '#',
    }
}

fn chart_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Chart(e.to_string())
}

/// Input for drawing the band chart
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandChart {
    /// BMI to mark, or `None` for the baseline bands only
    pub marker: Option<f64>,
}

impl BandChart {
    pub fn new(marker: Option<f64>) -> Self {
        Self { marker }
    }

    /// Chart for the latest entry of a session's history
    pub fn from_history(history: &HistoryStore) -> Self {
        Self::new(history.latest().map(|e| e.bmi))
    }

    pub fn bands(&self) -> &'static [Band] {
        &BANDS
    }

    /// Horizontal extent, widened to keep an out-of-range marker visible
    pub fn x_range(&self) -> (f64, f64) {
        let lo = BAND_EDGES[0];
        let hi = BAND_EDGES[BAND_EDGES.len() - 1];
        match self.marker {
            Some(bmi) if bmi.is_finite() => (lo.min(bmi - 1.0), hi.max(bmi + 1.0)),
            _ => (lo, hi),
        }
    }

    /// Render the chart as an SVG document
    pub fn render_svg(&self, width: u32, height: u32) -> Result<String> {
        let (x_min, x_max) = self.x_range();
        let mut svg = String::new();

        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(chart_error)?;

            let mut chart = ChartBuilder::on(&root)
                .margin(10)
                .x_label_area_size(30)
                .build_cartesian_2d(x_min..x_max, 0f64..1f64)
                .map_err(chart_error)?;

            chart
                .configure_mesh()
                .disable_mesh()
                .disable_y_axis()
                .x_desc("BMI")
                .draw()
                .map_err(chart_error)?;

            for band in BANDS.iter() {
                let fill = band.colour().mix(BAND_ALPHA);
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [(band.lower, 0.0), (band.upper, 1.0)],
                        fill.filled(),
                    )))
                    .map_err(chart_error)?
                    .label(band.legend)
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 15, y + 5)], fill.filled())
                    });
            }

            if let Some(bmi) = self.marker {
                chart
                    .draw_series(dash_segments(0.0, 1.0, MARKER_DASHES).into_iter().map(
                        |(from, to)| {
                            PathElement::new(vec![(bmi, from), (bmi, to)], BLACK.stroke_width(2))
                        },
                    ))
                    .map_err(chart_error)?
                    .label(format!("Your BMI ({:.1})", bmi))
                    .legend(|(x, y)| {
                        PathElement::new(vec![(x, y), (x + 8, y)], BLACK.stroke_width(2))
                    });
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperMiddle)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(chart_error)?;

            root.present().map_err(chart_error)?;
        }

        tracing::debug!(marker = ?self.marker, width, height, "Rendered SVG band chart");
        Ok(svg)
    }

    /// Render the chart as a text strip of `width` columns
    ///
    /// Line 1 is the band strip, line 2 holds the marker caret (blank when
    /// there is no marker), line 3 labels the band edges. A marker outside
    /// 15-40 is clamped to the nearest end of the strip.
    pub fn render_text(&self, width: usize) -> String {
        let width = width.max(BAND_EDGES.len() * 5);
        let lo = BAND_EDGES[0];
        let span = BAND_EDGES[BAND_EDGES.len() - 1] - lo;
        let column_of = |value: f64| -> usize {
            let col = ((value - lo) / span * width as f64).floor();
            col.clamp(0.0, (width - 1) as f64) as usize
        };

        let strip: String = (0..width)
            .map(|col| {
                let centre = lo + (col as f64 + 0.5) * span / width as f64;
                glyph_for(classify(centre))
            })
            .collect();

        let marker_line = match self.marker {
            Some(bmi) => {
                let col = column_of(bmi);
                format!("{}^ Your BMI ({:.1})", " ".repeat(col), bmi)
            }
            None => String::new(),
        };

        let mut axis = vec![' '; width + 4];
        for edge in BAND_EDGES {
            let label = format_edge(edge);
            let start = column_of(edge).min(axis.len() - label.len());
            let free = axis[start.saturating_sub(1)..start + label.len()]
                .iter()
                .all(|c| *c == ' ');
            if free {
                for (i, ch) in label.chars().enumerate() {
                    axis[start + i] = ch;
                }
            }
        }
        let axis: String = axis.into_iter().collect();

        format!("{}\n{}\n{}", strip, marker_line, axis.trim_end())
    }

    /// One-line legend matching the text strip glyphs
    pub fn text_legend(&self) -> String {
        BANDS
            .iter()
            .map(|b| format!("{} {}", b.glyph(), b.legend))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

fn format_edge(edge: f64) -> String {
    if edge.fract() == 0.0 {
        format!("{}", edge as i64)
    } else {
        format!("{:.1}", edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HistoryEntry;
    use chrono::Utc;

    #[test]
    fn test_bands_cover_edges_contiguously() {
        for (i, band) in BANDS.iter().enumerate() {
            assert_eq!(band.lower, BAND_EDGES[i]);
            assert_eq!(band.upper, BAND_EDGES[i + 1]);
        }
    }

    #[test]
    fn test_band_colours() {
        assert_eq!(BANDS[0].colour(), RGBColor(0, 0, 255));
        assert_eq!(BANDS[3].colour(), RGBColor(255, 0, 0));
    }

    #[test]
    fn test_from_history_uses_latest() {
        let mut history = HistoryStore::new();
        assert_eq!(BandChart::from_history(&history).marker, None);

        for bmi in [19.0, 27.5] {
            history.append(HistoryEntry {
                bmi,
                category: classify(bmi),
                recorded_at: Utc::now(),
            });
        }
        assert_eq!(BandChart::from_history(&history).marker, Some(27.5));
    }

    #[test]
    fn test_dash_segments() {
        let dashes = dash_segments(0.0, 1.0, 4);
        assert_eq!(
            dashes,
            vec![(0.0, 0.125), (0.25, 0.375), (0.5, 0.625), (0.75, 0.875)]
        );
    }

    #[test]
    fn test_render_svg_marker_is_dashed() {
        let baseline = BandChart::new(None).render_svg(800, 160).unwrap();
        let marked = BandChart::new(Some(24.2)).render_svg(800, 160).unwrap();
        let count = |svg: &str| svg.matches("<polyline").count();
        // One path per dash plus the legend sample
        assert_eq!(count(&marked) - count(&baseline), MARKER_DASHES + 1);
    }

    #[test]
    fn test_x_range_widens_for_outliers() {
        assert_eq!(BandChart::new(None).x_range(), (15.0, 40.0));
        assert_eq!(BandChart::new(Some(24.2)).x_range(), (15.0, 40.0));
        assert_eq!(BandChart::new(Some(45.0)).x_range(), (15.0, 46.0));
        assert_eq!(BandChart::new(Some(12.0)).x_range(), (11.0, 40.0));
    }

    #[test]
    fn test_render_text_baseline() {
        let text = BandChart::new(None).render_text(50);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);

        let strip = lines[0];
        assert_eq!(strip.chars().count(), 50);
        assert_eq!(&strip[0..7], ".......");
        assert_eq!(&strip[7..20], "=============");
        assert_eq!(&strip[20..30], "++++++++++");
        assert_eq!(&strip[30..50], "####################");
        assert!(lines[1].is_empty());
        assert!(lines[2].starts_with("15"));
        assert!(lines[2].contains("18.5"));
        assert!(lines[2].trim_end().ends_with("40"));
    }

    #[test]
    fn test_render_text_marker_position() {
        let text = BandChart::new(Some(24.2)).render_text(50);
        let marker = text.lines().nth(1).unwrap();
        assert_eq!(marker.find('^'), Some(18));
        assert!(marker.ends_with("Your BMI (24.2)"));
    }

    #[test]
    fn test_render_text_clamps_marker() {
        let high = BandChart::new(Some(55.0)).render_text(50);
        assert_eq!(high.lines().nth(1).unwrap().find('^'), Some(49));

        let low = BandChart::new(Some(10.0)).render_text(50);
        assert_eq!(low.lines().nth(1).unwrap().find('^'), Some(0));
    }

    #[test]
    fn test_text_legend() {
        assert_eq!(
            BandChart::default().text_legend(),
            ". Underweight  = Normal  + Overweight  # Obese"
        );
    }

    #[test]
    fn test_render_svg_with_marker() {
        let svg = BandChart::new(Some(24.2)).render_svg(800, 160).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Your BMI (24.2)"));
        assert!(svg.contains("Underweight"));
        assert!(svg.contains("Obese"));
    }

    #[test]
    fn test_render_svg_baseline_has_no_marker() {
        let svg = BandChart::new(None).render_svg(800, 160).unwrap();
        assert!(svg.contains("Normal"));
        assert!(!svg.contains("Your BMI"));
    }
}
