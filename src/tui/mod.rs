//! Ratatui-based terminal UI.
//!
//! The layout mirrors the original page: a header carrying the title and the
//! latest data date, the chart itself, a latest-reading panel (the tooltip
//! analog), and a footer with key help and a status line.
//!
//! One fetch per refresh; terminal resize only redraws the existing bundle.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::app::pipeline::{run_chart, RunOutput};
use crate::domain::{ChartConfig, ChartSeriesBundle};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::TrendPlottersChart;

/// Start the TUI.
pub fn run(config: ChartConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.refresh_data();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: ChartConfig,
    status: String,
    /// The last successful render cycle; `None` while degraded.
    run: Option<RunOutput>,
    /// Fallback bundle rendered when no dataset is available.
    empty: ChartSeriesBundle,
}

impl App {
    fn new(config: ChartConfig) -> Self {
        Self {
            config,
            status: "Loading data...".to_string(),
            run: None,
            empty: ChartSeriesBundle::empty(),
        }
    }

    /// One fetch/transform cycle. A failure degrades to the empty bundle and
    /// a visible error; it never exits the UI.
    fn refresh_data(&mut self) {
        match run_chart(&self.config) {
            Ok(run) => {
                self.status = format!("Loaded {} points from {}", run.raw.len(), run.source);
                self.run = Some(run);
            }
            Err(err) => {
                self.run = None;
                self.status = format!("Data load failed: {err}");
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                // Redraw only; no refetch on resize.
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('r') => {
                self.status = "Loading data...".to_string();
                self.refresh_data();
            }
            KeyCode::Char('t') => {
                self.config.theme = self.config.theme.next();
                self.status = format!("theme: {}", self.config.theme.display_name());
            }
            KeyCode::Char('s') => {
                self.config.use_sample = !self.config.use_sample;
                self.refresh_data();
            }
            _ => {}
        }
        false
    }

    fn bundle(&self) -> &ChartSeriesBundle {
        self.run.as_ref().map(|r| &r.bundle).unwrap_or(&self.empty)
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("trend", Style::default().fg(Color::Cyan)),
            Span::raw(" — actual assets vs 10% annualized target"),
        ]));

        let updated = self
            .run
            .as_ref()
            .and_then(|r| r.raw.latest_date().map(str::to_string))
            .unwrap_or_else(|| "data unavailable".to_string());
        let source = self
            .run
            .as_ref()
            .map(|r| r.source.clone())
            .unwrap_or_else(|| "-".to_string());

        lines.push(Line::from(Span::styled(
            format!(
                "updated: {updated} | source: {source} | theme: {}",
                self.config.theme.display_name()
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(7)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_latest(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Growth Trend").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let bundle = self.bundle();
        let (target, actual, band, x_bounds, y_bounds) = chart_series(bundle);

        let widget = TrendPlottersChart {
            categories: &bundle.categories,
            target: &target,
            actual: &actual,
            band,
            x_bounds,
            y_bounds,
            theme: self.config.theme,
        };
        frame.render_widget(widget, inner);

        if bundle.is_empty() {
            let msg = Paragraph::new("No data — press r to retry.")
                .style(Style::default().fg(Color::Yellow));
            let rect = Rect {
                x: inner.x + 2,
                y: inner.y + 1,
                width: inner.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(msg, rect);
        }
    }

    fn draw_latest(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Latest").borders(Borders::ALL);

        let Some(latest) = self.run.as_ref().and_then(|r| r.latest.as_ref()) else {
            let msg = Paragraph::new("No data.")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(msg, area);
            return;
        };

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(Span::styled(
            latest.date.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("actual: {:.2}", latest.actual)));
        lines.push(Line::from(format!("target: {:.2}", latest.target)));
        // Omitted entirely when the target is zero.
        if let Some(dev) = &latest.deviation {
            let color = if dev.diff_pct >= 0.0 {
                Color::Red
            } else {
                Color::Green
            };
            lines.push(Line::from(vec![
                Span::raw("deviation: "),
                Span::styled(format!("{}%", dev.label), Style::default().fg(color)),
            ]));
        }

        let p = Paragraph::new(Text::from(lines)).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "r refresh  t theme  s sample  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build chart series for Plotters (index space on x).
fn chart_series(
    bundle: &ChartSeriesBundle,
) -> (
    Vec<(f64, f64)>,
    Vec<(f64, f64)>,
    Option<[f64; 4]>,
    [f64; 2],
    [f64; 2],
) {
    let n = bundle.len();
    let x_max = if n > 1 { (n - 1) as f64 } else { 1.0 };
    let x_bounds = [0.0, x_max];

    let target: Vec<(f64, f64)> = bundle
        .target_series
        .iter()
        .enumerate()
        .map(|(i, &y)| (i as f64, y))
        .collect();
    let actual: Vec<(f64, f64)> = bundle
        .actual_series
        .iter()
        .enumerate()
        .map(|(i, &y)| (i as f64, y))
        .collect();

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in target.iter().chain(actual.iter()) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let band = bundle.band.as_ref().map(|b| {
        y_min = y_min.min(b.lower_value);
        y_max = y_max.max(b.upper_value);
        // A one-point dataset still gets a band across the full x-range.
        let bx1 = if b.end_index > b.anchor_index {
            b.end_index as f64
        } else {
            x_max
        };
        [b.anchor_index as f64, bx1, b.lower_value, b.upper_value]
    });

    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min - pad, y_max + pad];

    (target, actual, band, x_bounds, y_bounds)
}
