//! Multi-series SVG line chart.
//!
//! Rows are spaced evenly along the x axis. Each symbol gets one `<path>` in
//! its palette colour; a missing price lifts the pen, so the line shows a
//! gap instead of bridging or dropping to zero.

use crate::domain::chart_data::ChartData;
use crate::domain::error::PriceAlignError;
use crate::ports::chart_port::ChartPort;
use std::fmt::Write;

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 40.0;
const LEGEND_SLOT: f64 = 60.0;
const LEGEND_LINE: f64 = 14.0;

#[derive(Debug, Clone)]
pub struct SvgChartWriter {
    pub width: u32,
    pub height: u32,
}

impl SvgChartWriter {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Path data for one series. Consecutive present values are joined with
    /// `L`; the first value after a gap (or at the start) opens with `M`.
    pub fn series_path(&self, chart: &ChartData, symbol: &str) -> String {
        let Some((min, max)) = chart.price_bounds() else {
            return String::new();
        };
        let width = self.width as f64;
        let height = self.height as f64;
        let plot_width = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let plot_height = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
        let range = (max - min).max(f64::EPSILON);
        let last_index = (chart.rows.len() - 1).max(1) as f64;

        let x_scale = |i: usize| MARGIN_LEFT + (i as f64 / last_index) * plot_width;
        let y_scale = |v: f64| MARGIN_TOP + plot_height - ((v - min) / range) * plot_height;

        let mut path = String::new();
        let mut pen_down = false;
        for (i, row) in chart.rows.iter().enumerate() {
            match row.price(symbol) {
                Some(v) => {
                    let cmd = if pen_down { 'L' } else { 'M' };
                    if !path.is_empty() {
                        path.push(' ');
                    }
                    let _ = write!(path, "{} {:.1} {:.1}", cmd, x_scale(i), y_scale(v));
                    pen_down = true;
                }
                None => pen_down = false,
            }
        }
        path
    }
}

/// Legend entries sit right-aligned on the title line, wrapping onto further
/// lines when the plot is too narrow to hold them all.
fn legend_position(index: usize, count: usize, width: f64) -> (f64, f64) {
    let per_row = (((width - MARGIN_LEFT - MARGIN_RIGHT) / LEGEND_SLOT) as usize).max(1);
    let row = index / per_row;
    let in_row = per_row.min(count - row * per_row);
    let col = index % per_row;
    let x = width - MARGIN_RIGHT - LEGEND_SLOT * (in_row - col) as f64;
    (x, 15.0 + LEGEND_LINE * row as f64)
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl Default for SvgChartWriter {
    fn default() -> Self {
        Self::new(800, 400)
    }
}

impl ChartPort for SvgChartWriter {
    fn render(&self, chart: &ChartData) -> Result<String, PriceAlignError> {
        let width = self.width as f64;
        let height = self.height as f64;
        let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_height = height - MARGIN_TOP - MARGIN_BOTTOM;
        if plot_width <= 0.0 || plot_height <= 0.0 {
            return Err(PriceAlignError::Output {
                reason: format!("chart {}x{} is too small to plot", self.width, self.height),
            });
        }

        let mut svg = String::new();
        let _ = write!(
            svg,
            r##"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"##,
            w = self.width,
            h = self.height
        );
        svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
        let _ = writeln!(
            svg,
            "  <text x=\"{}\" y=\"15\" font-size=\"12\" fill=\"#666\">{}</text>",
            MARGIN_LEFT,
            chart.range.label()
        );
        let _ = writeln!(
            svg,
            "  <line x1=\"{l}\" y1=\"{t}\" x2=\"{l}\" y2=\"{b}\" stroke=\"#ccc\" stroke-width=\"1\"/>",
            l = MARGIN_LEFT,
            t = MARGIN_TOP,
            b = height - MARGIN_BOTTOM
        );
        let _ = writeln!(
            svg,
            "  <line x1=\"{l}\" y1=\"{b}\" x2=\"{r}\" y2=\"{b}\" stroke=\"#ccc\" stroke-width=\"1\"/>",
            l = MARGIN_LEFT,
            b = height - MARGIN_BOTTOM,
            r = width - MARGIN_RIGHT
        );

        if let Some((min, max)) = chart.price_bounds() {
            for (value, y) in [(max, MARGIN_TOP + 5.0), (min, height - MARGIN_BOTTOM - 5.0)] {
                let _ = writeln!(
                    svg,
                    "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{:.2}</text>",
                    MARGIN_LEFT - 5.0,
                    y,
                    value
                );
            }
        }

        if let (Some(first), Some(last)) = (chart.rows.first(), chart.rows.last()) {
            for (date, x) in [(first.date, MARGIN_LEFT), (last.date, width - MARGIN_RIGHT)] {
                let _ = writeln!(
                    svg,
                    "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{}</text>",
                    x,
                    height - MARGIN_BOTTOM / 2.0,
                    chart.range.tick_label(date)
                );
            }
        }

        for (i, symbol) in chart.symbols.iter().enumerate() {
            let color = chart.colors.get(i).copied().unwrap_or("#000000");
            let label = escape_xml(symbol);
            let path = self.series_path(chart, symbol);
            if !path.is_empty() {
                let _ = writeln!(
                    svg,
                    "  <path data-symbol=\"{}\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>",
                    label, path, color
                );
            }
            let (x, y) = legend_position(i, chart.symbols.len(), width);
            let _ = writeln!(
                svg,
                "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"{}\">{}</text>",
                x, y, color, label
            );
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_point::PricePoint;
    use crate::domain::series_store::SeriesStore;
    use crate::domain::time_range::TimeRange;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn gap_chart() -> ChartData {
        let mut store = SeriesStore::new();
        store.insert(
            "AAPL",
            vec![
                PricePoint::new(d(1), 100.0),
                PricePoint::new(d(2), 110.0),
                PricePoint::new(d(4), 120.0),
            ],
        );
        store.insert("MSFT", vec![PricePoint::new(d(3), 100.0)]);
        let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];
        ChartData::build(&store, &symbols, TimeRange::Month, d(10))
    }

    #[test]
    fn path_breaks_at_gap() {
        let writer = SvgChartWriter::new(480, 170);
        let path = writer.series_path(&gap_chart(), "AAPL");
        // plot 400x100, x step 133.3, y from 100..120
        assert_eq!(path, "M 60.0 130.0 L 193.3 80.0 M 460.0 30.0");
    }

    #[test]
    fn single_point_series_is_a_move() {
        let writer = SvgChartWriter::new(480, 170);
        let path = writer.series_path(&gap_chart(), "MSFT");
        assert_eq!(path, "M 326.7 130.0");
    }

    #[test]
    fn render_uses_palette_colors() {
        let svg = SvgChartWriter::default().render(&gap_chart()).unwrap();
        assert!(svg.starts_with("<svg width=\"800\" height=\"400\""));
        assert!(svg.contains("stroke=\"#00AAFF\""));
        assert!(svg.contains("stroke=\"#00FF99\""));
        assert!(svg.contains("Last Month"));
        assert!(svg.contains(">01-01<"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn render_empty_chart_has_no_paths() {
        let chart = ChartData::build(&SeriesStore::new(), &["AAPL".to_string()], TimeRange::Week, d(1));
        let svg = SvgChartWriter::default().render(&chart).unwrap();
        assert!(!svg.contains("<path"));
        assert!(svg.contains(">AAPL<"));
    }

    #[test]
    fn render_rejects_tiny_canvas() {
        let result = SvgChartWriter::new(50, 50).render(&gap_chart());
        assert!(matches!(result, Err(PriceAlignError::Output { .. })));
    }

    #[test]
    fn symbols_are_escaped() {
        let mut store = SeriesStore::new();
        store.insert("A&B", vec![PricePoint::new(d(1), 1.0), PricePoint::new(d(2), 2.0)]);
        let chart = ChartData::build(&store, &["A&B".to_string()], TimeRange::Month, d(10));

        let svg = SvgChartWriter::default().render(&chart).unwrap();

        assert!(svg.contains("data-symbol=\"A&amp;B\""));
        assert!(svg.contains(">A&amp;B<"));
        assert!(!svg.contains("A&B"));
    }

    #[test]
    fn legend_wraps_instead_of_leaving_canvas() {
        // 720px plot holds 12 entries per line
        assert_eq!(legend_position(0, 2, 800.0), (660.0, 15.0));
        assert_eq!(legend_position(1, 2, 800.0), (720.0, 15.0));
        assert_eq!(legend_position(0, 14, 800.0), (60.0, 15.0));
        assert_eq!(legend_position(12, 14, 800.0), (660.0, 29.0));
        assert_eq!(legend_position(13, 14, 800.0), (720.0, 29.0));

        let xs: Vec<f64> = (0..30).map(|i| legend_position(i, 30, 800.0).0).collect();
        assert!(xs.iter().all(|&x| x >= MARGIN_LEFT));
    }
}
