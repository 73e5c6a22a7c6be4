//! Chart renderers.
//!
//! Each panel is drawn in two steps: a pure chart model is built from the
//! dataset (bars, rows, colors), then the model is drawn onto a plotters
//! drawing area. The renderers are generic over the backend so the same
//! code draws into the composite PNG and into SVG strings in tests.

use crate::error::{NeoError, Result};
use crate::types::{DiameterEstimate, MissDistanceSample, VelocitySample};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Miss distances are plotted in units of 10^7 km.
pub const MISS_DISTANCE_SCALE: f64 = 1e7;

/// Lower bound of the diameter panel's logarithmic axis, in km.
pub const DIAMETER_FLOOR: f64 = 0.001;

const DIAMETER_BAR_HALF_WIDTH: f64 = 0.2;
const BAR_HALF_HEIGHT: f64 = 0.4;
const CAPTION_FONT: (&str, u32) = ("sans-serif", 20);

// ---------------------------------------------------------------------------
// Horizontal bar charts (miss distance, velocity)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Category row, counted from the bottom of the panel.
    pub row: u32,
}

impl Bar {
    /// Vertical extent on the row axis, centred on the bar's row.
    pub fn span(&self) -> (f64, f64) {
        let center = f64::from(self.row);
        (center - BAR_HALF_HEIGHT, center + BAR_HALF_HEIGHT)
    }
}

#[derive(Debug, Clone)]
pub struct HorizontalBarChart {
    pub title: &'static str,
    pub x_desc: &'static str,
    pub color: RGBColor,
    pub bars: Vec<Bar>,
}

impl HorizontalBarChart {
    /// Build a chart whose first value lands on the top row.
    fn inverted<I>(title: &'static str, x_desc: &'static str, color: RGBColor, values: I) -> Self
    where
        I: ExactSizeIterator<Item = (String, f64)>,
    {
        let count = values.len() as u32;
        let bars = values
            .enumerate()
            .map(|(i, (label, value))| Bar {
                label,
                value,
                row: count - 1 - i as u32,
            })
            .collect();
        Self {
            title,
            x_desc,
            color,
            bars,
        }
    }

    /// Number of category rows on the axis; an empty chart keeps one.
    pub fn rows(&self) -> u32 {
        (self.bars.len() as u32).max(1)
    }

    /// Value-axis bounds. Always includes the bar origin at zero.
    pub fn x_range(&self) -> (f64, f64) {
        let lo = self.bars.iter().map(|b| b.value).fold(0.0, f64::min);
        let hi = self.bars.iter().map(|b| b.value).fold(0.0, f64::max);
        if lo == hi {
            return (0.0, 1.0);
        }
        (lo * 1.05, hi * 1.05)
    }

    /// Labels indexed by row.
    pub fn row_labels(&self) -> Vec<String> {
        let mut labels = vec![String::new(); self.rows() as usize];
        for bar in &self.bars {
            labels[bar.row as usize] = bar.label.clone();
        }
        labels
    }
}

pub fn miss_distance_chart(samples: &[MissDistanceSample]) -> HorizontalBarChart {
    HorizontalBarChart::inverted(
        "Miss Distances of Asteroids",
        "Miss Distance (10^7 km)",
        RED,
        samples
            .iter()
            .map(|s| (s.name.clone(), s.distance / MISS_DISTANCE_SCALE)),
    )
}

pub fn velocity_chart(samples: &[VelocitySample]) -> HorizontalBarChart {
    HorizontalBarChart::inverted(
        "Relative Velocities of Asteroids",
        "Relative Velocity (km/s)",
        BLUE,
        samples.iter().map(|s| (s.name.clone(), s.velocity)),
    )
}

// ---------------------------------------------------------------------------
// Diameter range chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DiameterBar {
    pub label: &'static str,
    pub value: f64,
    /// Drawn height; never below the visible minimum of the log axis.
    pub height: f64,
    pub color: RGBColor,
}

#[derive(Debug, Clone, Default)]
pub struct DiameterChart {
    /// Max bar first, min bar second (drawn on top).
    pub bars: Vec<DiameterBar>,
}

impl DiameterChart {
    pub fn y_max(&self) -> f64 {
        let tallest = self.bars.iter().map(|b| b.height).fold(DIAMETER_FLOOR, f64::max);
        tallest * 10.0
    }
}

pub fn diameter_chart(estimate: Option<&DiameterEstimate>) -> DiameterChart {
    let Some(estimate) = estimate else {
        return DiameterChart::default();
    };

    let visible_min = DIAMETER_FLOOR * 2.0;
    let min_height = finite_or_zero(estimate.estimated_diameter_min).max(visible_min);
    let mut max_height = finite_or_zero(estimate.estimated_diameter_max).max(visible_min);
    // The min bar is drawn over the max bar; keep the max bar peeking out.
    if max_height <= min_height {
        max_height = min_height * 2.0;
    }

    DiameterChart {
        bars: vec![
            DiameterBar {
                label: "Max Diameter",
                value: estimate.estimated_diameter_max,
                height: max_height,
                color: YELLOW,
            },
            DiameterBar {
                label: "Min Diameter",
                value: estimate.estimated_diameter_min,
                height: min_height,
                color: GREEN,
            },
        ],
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

pub fn render_miss_distance<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    samples: &[MissDistanceSample],
) -> Result<()> {
    draw_horizontal_bars(panel, &miss_distance_chart(samples))
}

pub fn render_velocity<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    samples: &[VelocitySample],
) -> Result<()> {
    draw_horizontal_bars(panel, &velocity_chart(samples))
}

pub fn render_diameter_range<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    estimate: Option<&DiameterEstimate>,
) -> Result<()> {
    draw_diameter_chart(panel, &diameter_chart(estimate))
}

pub fn draw_horizontal_bars<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    chart: &HorizontalBarChart,
) -> Result<()> {
    let rows = chart.rows();
    let (x_min, x_max) = chart.x_range();
    let labels = chart.row_labels();
    let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;

    // Rows sit on integer positions; one tick per row carries its label.
    let y_axis = (-0.5..rows as f64 - 0.5).with_key_points((0..rows).map(f64::from).collect());
    let mut ctx = ChartBuilder::on(panel)
        .caption(chart.title, CAPTION_FONT.into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size((longest * 7 + 12).clamp(40, 240))
        .build_cartesian_2d(x_min..x_max, y_axis)
        .map_err(render_err)?;

    ctx.configure_mesh()
        .disable_y_mesh()
        .x_desc(chart.x_desc)
        .y_label_formatter(&|v: &f64| {
            let row = v.round();
            if row < 0.0 {
                return String::new();
            }
            labels.get(row as usize).cloned().unwrap_or_default()
        })
        .draw()
        .map_err(render_err)?;

    ctx.draw_series(chart.bars.iter().map(|bar| {
        let (bottom, top) = bar.span();
        Rectangle::new([(0.0, bottom), (bar.value, top)], chart.color.filled())
    }))
    .map_err(render_err)?;

    Ok(())
}

pub fn draw_diameter_chart<DB: DrawingBackend>(
    panel: &DrawingArea<DB, Shift>,
    chart: &DiameterChart,
) -> Result<()> {
    // No x label area: the category position carries no ticks.
    let mut ctx = ChartBuilder::on(panel)
        .caption(
            "Estimated Diameter of Asteroid (Min/Max)",
            CAPTION_FONT.into_font(),
        )
        .margin(10)
        .x_label_area_size(0)
        .y_label_area_size(60)
        .build_cartesian_2d(-1f64..1f64, (DIAMETER_FLOOR..chart.y_max()).log_scale())
        .map_err(render_err)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .y_desc("Diameter (km, log scale)")
        .draw()
        .map_err(render_err)?;

    for bar in &chart.bars {
        let color = bar.color;
        ctx.draw_series(std::iter::once(Rectangle::new(
            [
                (-DIAMETER_BAR_HALF_WIDTH, DIAMETER_FLOOR),
                (DIAMETER_BAR_HALF_WIDTH, bar.height),
            ],
            color.filled(),
        )))
        .map_err(render_err)?
        .label(bar.label)
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    if !chart.bars.is_empty() {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}

fn render_err<E: std::fmt::Display>(e: E) -> NeoError {
    NeoError::Render(e.to_string())
}
