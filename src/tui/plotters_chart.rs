//! The growth chart itself: a Plotters scene drawn into the Ratatui buffer
//! via `plotters-ratatui-backend`.
//!
//! Plotters (rather than Ratatui's `Chart` widget) buys us proper axis/tick
//! handling and the filled rectangle we need for the deviation band, and
//! leaves the door open for PNG/SVG export backends later.

use plotters::prelude::*;
// `ratatui::style::Color` below shadows the Plotters `Color` trait that
// provides `mix`; re-import the trait anonymously so tint math keeps working.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::Theme;

/// One frame of the growth chart, fully described by value.
///
/// Series points, the band rectangle, and the axis bounds are all prepared
/// by the caller (`chart_series`); the widget only draws. That split keeps
/// the coordinate math testable without a terminal.
pub struct TrendPlottersChart<'a> {
    /// Category labels for x tick formatting (dates).
    pub categories: &'a [String],
    /// Line series for the growth target.
    pub target: &'a [(f64, f64)],
    /// Line series for the actual asset value.
    pub actual: &'a [(f64, f64)],
    /// Deviation band rectangle: `[x0, x1, lower, upper]`.
    pub band: Option<[f64; 4]>,
    /// X bounds (category index space).
    pub x_bounds: [f64; 2],
    /// Y bounds (asset value).
    pub y_bounds: [f64; 2],
    pub theme: Theme,
}

impl Widget for TrendPlottersChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters cannot lay out axes in a handful of cells; below this
        // size show a hint instead of attempting (and failing) a chart.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        // High-contrast palette for terminal rendering; series colors follow
        // the original chart (blue target, red actual, green band).
        let axis = match self.theme {
            Theme::Light => RGBColor(0, 0, 0),
            Theme::Dark => RGBColor(255, 255, 255),
        };
        let target_color = RGBColor(52, 152, 219);
        let actual_color = RGBColor(231, 76, 60);
        let band_color = RGBColor(46, 204, 113);

        // The backend's `widget_fn` helper hands us a Plotters drawing area
        // backed by the terminal buffer; everything below is plain Plotters.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Label areas are in terminal cells, so keep them compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Mesh lines are noise at terminal resolution; axes and tick
            // labels carry enough structure.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("date")
                .y_desc("value")
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| fmt_category(self.categories, *v))
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&axis))
                .axis_style(&axis)
                .bold_line_style(&axis)
                .draw()?;

            // 1) Deviation band (background): translucent fill plus a faint
            // outline so the tolerance edges stay readable.
            if let Some([bx0, bx1, lower, upper]) = self.band {
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(bx0, lower), (bx1, upper)],
                    band_color.mix(0.15).filled(),
                )))?;
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(bx0, lower), (bx1, upper)],
                    band_color.mix(0.4),
                )))?;
            }

            // 2) Growth target line.
            chart.draw_series(LineSeries::new(self.target.iter().copied(), &target_color))?;

            // 3) Actual asset value line (on top).
            chart.draw_series(LineSeries::new(self.actual.iter().copied(), &actual_color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Map an x tick position back to the nearest category label.
fn fmt_category(categories: &[String], v: f64) -> String {
    if categories.is_empty() || v < -0.5 {
        return format!("{v:.0}");
    }
    match categories.get(v.round() as usize) {
        Some(label) => label.clone(),
        None => format!("{v:.0}"),
    }
}
