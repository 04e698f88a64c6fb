//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements, drawn back to front:
//! - deviation band: `.` shading
//! - target line: `-`
//! - actual line: `*`

use crate::domain::ChartSeriesBundle;

/// Render the series bundle as a character grid.
pub fn render_ascii_plot(bundle: &ChartSeriesBundle, width: usize, height: usize) -> String {
    if bundle.is_empty() {
        return "Plot: (no data)\n".to_string();
    }

    let width = width.max(10);
    let height = height.max(5);
    let n = bundle.len();

    let (y_min, y_max) = y_range(bundle).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Band first so the series lines overlay it.
    if let Some(band) = &bundle.band {
        let x0 = map_x(band.anchor_index, n, width);
        let x1 = map_x(band.end_index, n, width);
        let row_hi = map_y(band.upper_value, y_min, y_max, height);
        let row_lo = map_y(band.lower_value, y_min, y_max, height);
        for row in grid.iter_mut().take(row_lo + 1).skip(row_hi) {
            for cell in row.iter_mut().take(x1 + 1).skip(x0) {
                *cell = '.';
            }
        }
    }

    draw_series(&mut grid, &bundle.target_series, n, y_min, y_max, '-');
    draw_series(&mut grid, &bundle.actual_series, n, y_min, y_max, '*');

    let mut out = String::new();
    out.push_str(&format!("Plot: n={n} | y=[{y_min:.2}, {y_max:.2}]\n"));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn y_range(bundle: &ChartSeriesBundle) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for &y in bundle.target_series.iter().chain(bundle.actual_series.iter()) {
        min = min.min(y);
        max = max.max(y);
    }
    if let Some(band) = &bundle.band {
        min = min.min(band.lower_value);
        max = max.max(band.upper_value);
    }

    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else if min.is_finite() && max.is_finite() {
        // Flat data: open a unit window around it so mapping stays defined.
        Some((min - 0.5, max + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(index: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let u = (index as f64 / (n as f64 - 1.0)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_series(grid: &mut [Vec<char>], series: &[f64], n: usize, y_min: f64, y_max: f64, ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev: Option<(usize, usize)> = None;
    for (i, &y) in series.iter().enumerate() {
        let x = map_x(i, n, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, ch);
        } else {
            grid[yy][x] = ch;
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish). Overwrites whatever is underneath:
/// draw order defines layering.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{transform, RawDataset};

    #[test]
    fn plot_golden_snapshot_small() {
        let raw = RawDataset {
            date: vec!["d1".to_string(), "d2".to_string()],
            target: vec![100.0, 110.0],
            actual: vec![95.0, 120.0],
        };
        let bundle = transform(&raw).unwrap();

        let txt = render_ascii_plot(&bundle, 10, 5);
        let expected = concat!(
            "Plot: n=2 | y=[93.75, 121.25]\n",
            "        **\n",
            "......**..\n",
            "....**----\n",
            "--**-     \n",
            "**        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_bundle_renders_placeholder() {
        let txt = render_ascii_plot(&ChartSeriesBundle::empty(), 40, 10);
        assert_eq!(txt, "Plot: (no data)\n");
    }

    #[test]
    fn single_point_renders_without_panicking() {
        let raw = RawDataset {
            date: vec!["d1".to_string()],
            target: vec![100.0],
            actual: vec![100.0],
        };
        let bundle = transform(&raw).unwrap();
        let txt = render_ascii_plot(&bundle, 20, 6);
        assert!(txt.contains('*'));
        assert!(txt.contains('.'));
    }
}
