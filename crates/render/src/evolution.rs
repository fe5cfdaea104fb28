//! Time-evolution line charts
//!
//! The time axis is always logarithmic. The y axis is linear over `[0, 1]` for
//! fraction units and logarithmic otherwise, with values clamped to a small
//! positive floor so that decayed-out series stay on the chart.

use common::YUnit;
use indexmap::IndexMap;
use plotters::coord::ranged1d::ValueFormatter;
use plotters::coord::Shift;
use plotters::prelude::IntoLogRange;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::context::{FigureSize, RenderContext, RenderedImage};
use crate::error::{RenderError, Result};

/// Smallest value drawn on a logarithmic y axis
pub const LOG_FLOOR: f64 = 1e-10;

/// Y-axis scale of an evolution chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YScale {
    /// `[0, 1]`, for fractions
    Linear,
    /// Logarithmic, values below `floor` drawn at `floor`
    Log { floor: f64 },
}

impl YScale {
    pub fn for_unit(unit: YUnit) -> Self {
        if unit.is_fraction() {
            YScale::Linear
        } else {
            YScale::Log { floor: LOG_FLOOR }
        }
    }

    pub fn floor(&self) -> f64 {
        match self {
            YScale::Linear => 0.0,
            YScale::Log { floor } => *floor,
        }
    }
}

/// Everything drawn on an evolution chart
#[derive(Debug, Clone)]
pub struct EvolutionPlot<'a> {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Sample times in display units; must be positive
    pub times: &'a [f64],
    /// One series per nuclide, aligned with `times`
    pub series: &'a IndexMap<&'static str, Vec<f64>>,
    pub y_scale: YScale,
}

impl EvolutionPlot<'_> {
    fn validate(&self) -> Result<()> {
        if self.times.is_empty() {
            return Err(RenderError::empty_plot("no sample times"));
        }
        if self.times.iter().any(|t| !t.is_finite() || *t <= 0.0) {
            return Err(RenderError::empty_plot(
                "sample times must be positive for a logarithmic time axis",
            ));
        }
        if let Some((name, _)) = self
            .series
            .iter()
            .find(|(_, values)| values.len() != self.times.len())
        {
            return Err(RenderError::empty_plot(format!(
                "series {} does not match the sample times",
                name
            )));
        }
        Ok(())
    }

    fn x_range(&self) -> (f64, f64) {
        let lo = self.times.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if hi > lo {
            (lo, hi)
        } else {
            (lo / 10.0, hi * 10.0)
        }
    }

    /// Axis bounds on a log scale: a little below the smallest value above
    /// the floor, a little above the largest
    fn log_bounds(&self, floor: f64) -> (f64, f64) {
        let values = self.series.values().flatten().copied().filter(|v| v.is_finite());
        let (min_pos, max) = values.fold((f64::INFINITY, 0.0_f64), |(lo, hi), v| {
            let lo = if v > floor { lo.min(v) } else { lo };
            (lo, hi.max(v))
        });
        if !min_pos.is_finite() {
            return (floor, 1.0);
        }
        let lo = (min_pos / 2.0).max(floor);
        let hi = (max * 2.0).max(lo * 10.0);
        (lo, hi)
    }

    /// Series that are worth drawing, with values clamped into `[lo, hi]`
    fn drawable_series(&self, lo: f64, hi: f64) -> Vec<(&'static str, Vec<(f64, f64)>)> {
        let skip_zero = matches!(self.y_scale, YScale::Log { .. });
        self.series
            .iter()
            .filter(|(_, values)| !(skip_zero && values.iter().all(|v| *v <= 0.0)))
            .map(|(name, values)| {
                let points = self
                    .times
                    .iter()
                    .zip(values)
                    .map(|(t, v)| (*t, if v.is_finite() { v.clamp(lo, hi) } else { lo }))
                    .collect();
                (*name, points)
            })
            .collect()
    }

    pub fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, dpi: u32) -> Result<()> {
        self.validate()?;
        let unit = dpi as f64 / 100.0;
        area.fill(&WHITE)?;

        let (x_lo, x_hi) = self.x_range();
        let mut builder = ChartBuilder::on(area);
        builder
            .caption(&self.title, ("sans-serif", 22.0 * unit))
            .margin((15.0 * unit) as u32)
            .x_label_area_size((50.0 * unit) as u32)
            .y_label_area_size((80.0 * unit) as u32);

        match self.y_scale {
            YScale::Log { floor } => {
                let (lo, hi) = self.log_bounds(floor);
                let mut chart =
                    builder.build_cartesian_2d((x_lo..x_hi).log_scale(), (lo..hi).log_scale())?;
                self.draw_lines(&mut chart, (lo, hi), &|v| format!("{:.0e}", v), unit)
            }
            YScale::Linear => {
                let mut chart = builder.build_cartesian_2d((x_lo..x_hi).log_scale(), 0.0..1.05)?;
                self.draw_lines(&mut chart, (0.0, 1.0), &|v| format!("{:.2}", v), unit)
            }
        }
    }

    fn draw_lines<'c, DB, X, Y>(
        &self,
        chart: &mut ChartContext<'c, DB, Cartesian2d<X, Y>>,
        (lo, hi): (f64, f64),
        y_format: &dyn Fn(&f64) -> String,
        unit: f64,
    ) -> Result<()>
    where
        DB: DrawingBackend + 'c,
        X: Ranged<ValueType = f64> + ValueFormatter<f64>,
        Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
    {
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .x_label_formatter(&|v| format_tick(*v))
            .y_label_formatter(y_format)
            .axis_desc_style(("sans-serif", 15.0 * unit))
            .label_style(("sans-serif", 13.0 * unit))
            .bold_line_style(BLACK.mix(0.2))
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        let mut legend = Vec::new();
        for (idx, (name, points)) in self.drawable_series(lo, hi).into_iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            chart.draw_series(LineSeries::new(points, color.stroke_width(2)))?;
            legend.push((name, color));
        }

        draw_legend(&chart.plotting_area().strip_coord_spec(), &legend, unit)
    }
}

/// Legend box in the upper-right corner of `area`
///
/// Text is measured and drawn through the backend, so the bitmap fallback of
/// [`crate::FontSafeBackend`] applies when no font is installed. Plotters' own
/// series labels measure text with the font directly and fail in that case.
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    entries: &[(&'static str, RGBAColor)],
    unit: f64,
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let style = TextStyle::from(("sans-serif", 13.0 * unit).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let (mut text_w, mut text_h) = (0, 0);
    for (name, _) in entries {
        let (w, h) = area.estimate_text_size(name, &style)?;
        text_w = text_w.max(w as i32);
        text_h = text_h.max(h as i32);
    }

    let pad = (6.0 * unit).round().max(2.0) as i32;
    let swatch = (20.0 * unit).round() as i32;
    let row = text_h + pad;
    let box_w = swatch + text_w + 3 * pad;
    let box_h = row * entries.len() as i32 + pad;
    let (area_w, _) = area.dim_in_pixel();
    let x0 = (area_w as i32 - box_w - pad).max(0);
    let y0 = pad;
    let corners = [(x0, y0), (x0 + box_w, y0 + box_h)];

    area.draw(&Rectangle::new(corners, WHITE.mix(0.85).filled()))?;
    area.draw(&Rectangle::new(corners, BLACK.mix(0.4)))?;
    for (idx, (name, color)) in entries.iter().enumerate() {
        let y = y0 + pad + row * idx as i32 + text_h / 2;
        area.draw(&PathElement::new(
            vec![(x0 + pad, y), (x0 + pad + swatch, y)],
            color.stroke_width(2),
        ))?;
        area.draw_text(name, &style, (x0 + 2 * pad + swatch, y))?;
    }
    Ok(())
}

/// Compact tick label: `0.01`, `5`, `250`, `1e5`
fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs == 0.0 {
        "0".to_string()
    } else if !(1e-3..1e5).contains(&abs) {
        format!("{:.0e}", value)
    } else if abs >= 10.0 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.3}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Render an evolution chart at `size` inches and `dpi`
pub fn render_evolution(plot: &EvolutionPlot<'_>, size: FigureSize, dpi: u32) -> Result<RenderedImage> {
    plot.validate()?;
    let mut ctx = RenderContext::for_figure(size, dpi)?;
    ctx.draw(|area| plot.draw(area, dpi))?;
    ctx.finish()
}
